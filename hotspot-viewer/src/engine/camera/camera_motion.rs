use bevy::prelude::*;

use crate::engine::camera::arc_rotate::ArcRotateCamera;
use crate::engine::camera::free_camera::FreeCamera;
use crate::engine::config::viewer_config::ViewerConfig;

/// Camera seeking state. At most one target is active; seeking again replaces it.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub enum CameraMotion {
    #[default]
    Idle,
    Seeking {
        target: Vec3,
    },
}

/// Result of one interpolation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    pub position: Vec3,
    pub arrived: bool,
}

impl CameraMotion {
    pub fn target(&self) -> Option<Vec3> {
        match *self {
            CameraMotion::Idle => None,
            CameraMotion::Seeking { target } => Some(target),
        }
    }

    pub fn is_seeking(&self) -> bool {
        matches!(self, CameraMotion::Seeking { .. })
    }

    pub fn seek(&mut self, target: Vec3) {
        *self = CameraMotion::Seeking { target };
    }

    pub fn reset(&mut self) {
        *self = CameraMotion::Idle;
    }

    /// Close `blend_factor` of the remaining distance to the target.
    ///
    /// Once the next position is within `arrival_epsilon` of the target the
    /// camera snaps onto it and the motion returns to `Idle`. The same happens
    /// when f32 rounding leaves the step without progress, which occurs far
    /// from the origin. While idle the position is returned untouched.
    pub fn step(&mut self, position: Vec3, blend_factor: f32, arrival_epsilon: f32) -> MotionStep {
        let CameraMotion::Seeking { target } = *self else {
            return MotionStep {
                position,
                arrived: false,
            };
        };

        let next = position.lerp(target, blend_factor);
        let remaining = next.distance(target);
        if remaining <= arrival_epsilon || remaining >= position.distance(target) {
            *self = CameraMotion::Idle;
            return MotionStep {
                position: target,
                arrived: true,
            };
        }

        MotionStep {
            position: next,
            arrived: false,
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CameraArrived {
    pub position: Vec3,
}

/// Per-frame seeking step. Drives the free camera's position or the orbit camera's focus.
pub fn camera_control(
    mut motion: ResMut<CameraMotion>,
    config: Res<ViewerConfig>,
    mut free_cameras: Query<&mut Transform, With<FreeCamera>>,
    mut arc_cameras: Query<&mut ArcRotateCamera>,
    mut arrivals: EventWriter<CameraArrived>,
) {
    if !motion.is_seeking() {
        return;
    }

    let step = if let Ok(mut transform) = free_cameras.single_mut() {
        let step = motion.step(
            transform.translation,
            config.blend_factor,
            config.arrival_epsilon,
        );
        transform.translation = step.position;
        step
    } else if let Ok(mut orbit) = arc_cameras.single_mut() {
        let step = motion.step(orbit.focus, config.blend_factor, config.arrival_epsilon);
        orbit.focus = step.position;
        step
    } else {
        return;
    };

    if step.arrived {
        info!("Camera arrived at {}", step.position);
        arrivals.write(CameraArrived {
            position: step.position,
        });
    }
}
