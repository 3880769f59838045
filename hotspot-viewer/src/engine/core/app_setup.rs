use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::pbr::wireframe::{WireframeConfig, WireframePlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
// Crate engine modules
use crate::constants::render_settings::HIGHLIGHT_COLOUR;
use crate::engine::camera::{
    arc_rotate::arc_rotate_controller,
    camera_motion::{CameraArrived, CameraMotion, camera_control},
    free_camera::free_camera_controller,
    viewer_camera::spawn_viewer_camera,
};
use crate::engine::config::config_loader::{ConfigLoader, apply_viewer_config, start_config_load};
use crate::engine::config::viewer_config::ViewerConfig;
use crate::engine::error::ViewerErrorEvent;
use crate::engine::loading::floor_loader::{check_floor_load, start_floor_load};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::{
    floor::prepare_floor,
    lighting::spawn_lighting,
    skybox::{SkyboxState, SkyboxTextureRequest, apply_skybox_requests, spawn_skybox},
    teardown::{ViewerTeardown, teardown_viewer},
    viewer_scene::ViewerScene,
};
use crate::engine::systems::fps_tracking::fps_notification_system;
// Crate tools modules
use crate::tools::hotspots::{HotspotPlugin, discovery::discover_hotspots};
// Web RPC
use crate::engine::core::window_config::create_window_config;
use crate::rpc::web_rpc::WebRpcPlugin;
// Transitions
use crate::engine::core::app_state::{
    AppState, transition_to_running, update_loading_frontend, viewer_active,
};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{fps_text_update_system, spawn_fps_overlay};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers ViewerConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<ViewerConfig>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(WireframePlugin::default())
        .insert_resource(WireframeConfig {
            global: false,
            default_color: HIGHLIGHT_COLOUR,
        });

    // Plugin for hotspot picking and highlighting
    app.add_plugins(HotspotPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ConfigLoader>()
        .init_resource::<ViewerScene>()
        .init_resource::<CameraMotion>()
        .init_resource::<SkyboxState>()
        .add_event::<ViewerErrorEvent>()
        .add_event::<CameraArrived>()
        .add_event::<SkyboxTextureRequest>()
        .add_event::<ViewerTeardown>();

    // State-based system scheduling
    app.add_systems(Startup, start_config_load)
        .add_systems(
            Update,
            apply_viewer_config.run_if(in_state(AppState::Configuring)),
        )
        .add_systems(
            OnEnter(AppState::Loading),
            (spawn_viewer_camera, spawn_lighting, spawn_skybox, start_floor_load),
        )
        .add_systems(
            Update,
            (
                // Loading phase systems
                check_floor_load,
                prepare_floor,
                discover_hotspots,
                transition_to_running,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        );

    // Runtime systems: the scene exists, whether or not the floor has settled.
    app.add_systems(
        Update,
        (
            apply_skybox_requests,
            (camera_control, free_camera_controller, arc_rotate_controller).chain(),
            fps_notification_system,
        )
            .run_if(viewer_active),
    );

    app.add_systems(Update, update_loading_frontend);
    // Last in the frame so disposal wins over any transition requested this frame.
    app.add_systems(PostUpdate, teardown_viewer);

    // Add the FPS overlay only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, spawn_fps_overlay)
            .add_systems(Update, fps_text_update_system);
    }

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
