use bevy::prelude::*;

use crate::engine::camera::arc_rotate::ArcRotateCamera;
use crate::engine::camera::camera_motion::CameraMotion;
use crate::engine::camera::free_camera::FreeCamera;
use crate::engine::config::viewer_config::{CameraMode, ViewerConfig};
use crate::engine::scene::viewer_scene::ViewerScene;

/// Marks the single camera the viewer renders through.
#[derive(Component)]
pub struct ViewerCamera;

/// Spawn the one viewer camera for the configured mode.
pub fn spawn_viewer_camera(
    mut commands: Commands,
    config: Res<ViewerConfig>,
    mut viewer_scene: ResMut<ViewerScene>,
    mut motion: ResMut<CameraMotion>,
) {
    motion.reset();

    let camera = match config.camera {
        CameraMode::Free => {
            let free = FreeCamera::default();
            let transform =
                Transform::from_translation(config.camera_start()).with_rotation(free.rotation());
            commands
                .spawn((Name::new("Camera"), ViewerCamera, Camera3d::default(), transform, free))
                .id()
        }
        CameraMode::ArcRotate => {
            let orbit = ArcRotateCamera::from_settings(Vec3::ZERO, &config.arc_rotate);
            commands
                .spawn((
                    Name::new("Camera"),
                    ViewerCamera,
                    Camera3d::default(),
                    orbit.transform(),
                    orbit,
                ))
                .id()
        }
    };

    info!("Spawned {:?} viewer camera", config.camera);
    viewer_scene.camera = Some(camera);
}
