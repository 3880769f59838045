use bevy::asset::io::AssetReaderError;
use bevy::asset::{AssetLoadError, LoadState};
use bevy::prelude::*;

use crate::constants::path::VIEWER_CONFIG_PATH;
use crate::engine::config::viewer_config::ViewerConfig;
use crate::engine::core::app_state::AppState;
use crate::engine::error::{ViewerError, ViewerErrorEvent};

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<ViewerConfig>>,
}

pub fn start_config_load(mut config_loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    config_loader.handle = Some(asset_server.load(VIEWER_CONFIG_PATH));
}

/// Insert the loaded (or default) config and move on to scene bootstrap.
pub fn apply_viewer_config(
    config_loader: Res<ConfigLoader>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<ViewerConfig>>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
    mut errors: EventWriter<ViewerErrorEvent>,
) {
    let Some(handle) = config_loader.handle.as_ref() else {
        return;
    };

    let loaded = match configs.get(handle) {
        Some(config) => Ok(config.clone()),
        None => match asset_server.get_load_state(handle) {
            Some(LoadState::Failed(err)) if is_missing_file(&err) => {
                info!("No {} found, using built-in viewer defaults", VIEWER_CONFIG_PATH);
                Ok(ViewerConfig::default())
            }
            Some(LoadState::Failed(err)) => Err(ViewerError::ConfigLoad(err.to_string())),
            _ => return,
        },
    };

    let config = match loaded.and_then(|config| config.validate().map(|()| config)) {
        Ok(config) => config,
        Err(err) => {
            warn!("{err}; falling back to defaults");
            errors.write(ViewerErrorEvent(err));
            ViewerConfig::default()
        }
    };

    info!(
        "Viewer config applied: camera {:?}, hotspots {}",
        config.camera, config.hotspots
    );
    commands.insert_resource(config);
    next_state.set(AppState::Loading);
}

fn is_missing_file(err: &AssetLoadError) -> bool {
    matches!(
        err,
        AssetLoadError::AssetReaderError(AssetReaderError::NotFound(_))
    )
}
