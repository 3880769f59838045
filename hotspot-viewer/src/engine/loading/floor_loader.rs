use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;

use crate::engine::config::viewer_config::ViewerConfig;
use crate::engine::error::{ViewerError, ViewerErrorEvent};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::viewer_scene::ViewerScene;

/// In-flight floor import.
#[derive(Resource)]
pub struct FloorLoad {
    pub handle: Handle<Scene>,
    pub path: String,
    pub started_at: f32,
}

// Kick off the floor import and spawn its root with the configured placement.
pub fn start_floor_load(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<ViewerConfig>,
    time: Res<Time>,
    mut viewer_scene: ResMut<ViewerScene>,
) {
    let path = config.assets.floor_mesh.clone();
    info!("Loading floor mesh from: {}", path);

    let handle: Handle<Scene> = asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.clone()));

    let root = commands
        .spawn((
            Name::new("Floor"),
            SceneRoot(handle.clone()),
            config.floor.transform(),
        ))
        .observe(on_floor_scene_ready)
        .id();

    viewer_scene.floor_root = Some(root);
    commands.insert_resource(FloorLoad {
        handle,
        path,
        started_at: time.elapsed_secs(),
    });
}

/// Fires once the floor scene's entities exist in the world.
pub fn on_floor_scene_ready(
    _trigger: Trigger<SceneInstanceReady>,
    mut loading_progress: ResMut<LoadingProgress>,
) {
    if loading_progress.error.is_none() {
        info!("✓ Floor scene spawned");
        loading_progress.floor_spawned = true;
    }
}

// Settle the import as failed or timed out; success is reported by the observer.
pub fn check_floor_load(
    mut loading_progress: ResMut<LoadingProgress>,
    floor_load: Option<Res<FloorLoad>>,
    config: Res<ViewerConfig>,
    asset_server: Res<AssetServer>,
    time: Res<Time>,
    mut commands: Commands,
    mut viewer_scene: ResMut<ViewerScene>,
    mut errors: EventWriter<ViewerErrorEvent>,
) {
    if loading_progress.floor_spawned || loading_progress.is_settled() {
        return;
    }
    let Some(floor_load) = floor_load else {
        return;
    };

    let failure = match asset_server.get_load_state(&floor_load.handle) {
        Some(LoadState::Failed(err)) => Some(err.to_string()),
        _ => None,
    };
    let elapsed = time.elapsed_secs() - floor_load.started_at;

    let Some(err) = settle_floor_load(
        &floor_load.path,
        failure,
        elapsed,
        config.load_timeout_secs,
    ) else {
        return;
    };

    error!("{err}");
    // Dropping the root cancels a late spawn so nothing attaches to a stale floor.
    if let Some(root) = viewer_scene.floor_root.take() {
        commands.entity(root).despawn();
    }
    commands.remove_resource::<FloorLoad>();
    errors.write(ViewerErrorEvent(err.clone()));
    loading_progress.error = Some(err);
}

/// Decide whether a pending floor import has failed for good.
pub fn settle_floor_load(
    path: &str,
    failure: Option<String>,
    elapsed_secs: f32,
    timeout_secs: f32,
) -> Option<ViewerError> {
    if let Some(reason) = failure {
        return Some(ViewerError::FloorLoad {
            path: path.to_string(),
            reason,
        });
    }
    if elapsed_secs >= timeout_secs {
        return Some(ViewerError::FloorLoadTimeout {
            path: path.to_string(),
            secs: timeout_secs,
        });
    }
    None
}
