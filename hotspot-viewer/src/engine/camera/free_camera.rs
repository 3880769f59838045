use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::math::EulerRot;
use bevy::prelude::*;

use crate::engine::camera::camera_motion::CameraMotion;
use crate::engine::camera::input::accumulate_scroll;
use crate::engine::config::viewer_config::ViewerConfig;

// Keeps the view just short of straight up / down.
const PITCH_LIMIT: f32 = 1.55;

/// Mouse-look camera. Keyboard movement is deliberately absent.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct FreeCamera {
    pub yaw: f32,
    pub pitch: f32,
}

impl FreeCamera {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Apply a drag delta in pixels.
    pub fn look(&mut self, mouse_delta: Vec2, sensitivity: f32) {
        self.yaw -= mouse_delta.x * sensitivity;
        self.pitch = (self.pitch - mouse_delta.y * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}

pub fn free_camera_controller(
    mut cameras: Query<(&mut Transform, &mut FreeCamera)>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    config: Res<ViewerConfig>,
    motion: Res<CameraMotion>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let scroll = accumulate_scroll(&mut scroll_events);

    let Ok((mut transform, mut camera)) = cameras.single_mut() else {
        return;
    };

    // Drag to look around
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        camera.look(mouse_delta, config.free_camera.look_sensitivity);
    }
    transform.rotation = camera.rotation();

    // Dolly along the view direction; seeking owns the translation until it arrives.
    if scroll.abs() > f32::EPSILON && !motion.is_seeking() {
        let forward = transform.forward();
        transform.translation += forward * (scroll * config.free_camera.dolly_speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dragging_right_turns_right() {
        let mut camera = FreeCamera::default();
        camera.look(Vec2::new(100.0, 0.0), 0.0035);
        let forward = camera.rotation() * Vec3::NEG_Z;
        assert!(forward.x > 0.0, "forward {forward} should swing towards +X");
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = FreeCamera::default();
        camera.look(Vec2::new(0.0, -1.0e6), 0.0035);
        assert_eq!(camera.pitch, PITCH_LIMIT);
        camera.look(Vec2::new(0.0, 1.0e6), 0.0035);
        assert_eq!(camera.pitch, -PITCH_LIMIT);
    }
}
