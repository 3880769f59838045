use std::f32::consts::PI;

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::engine::camera::input::accumulate_scroll;
use crate::engine::config::viewer_config::{ArcRotateSettings, ViewerConfig};

// Polar angle margin that keeps `looking_at` away from the poles.
const BETA_MARGIN: f32 = 0.01;

/// Orbit camera: `alpha` is the azimuth around +Y, `beta` the polar angle from +Y.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ArcRotateCamera {
    pub focus: Vec3,
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
}

impl Default for ArcRotateCamera {
    fn default() -> Self {
        Self::from_settings(Vec3::ZERO, &ArcRotateSettings::default())
    }
}

impl ArcRotateCamera {
    pub fn from_settings(focus: Vec3, settings: &ArcRotateSettings) -> Self {
        Self {
            focus,
            alpha: settings.alpha,
            beta: settings.beta.clamp(BETA_MARGIN, PI - BETA_MARGIN),
            radius: settings.radius.clamp(settings.min_radius, settings.max_radius),
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_beta, cos_beta) = self.beta.sin_cos();
        let (sin_alpha, cos_alpha) = self.alpha.sin_cos();
        self.focus + self.radius * Vec3::new(cos_alpha * sin_beta, cos_beta, sin_alpha * sin_beta)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.focus, Vec3::Y)
    }

    pub fn orbit(&mut self, mouse_delta: Vec2, sensitivity: f32) {
        self.alpha -= mouse_delta.x * sensitivity;
        self.beta = (self.beta - mouse_delta.y * sensitivity).clamp(BETA_MARGIN, PI - BETA_MARGIN);
    }

    pub fn zoom(&mut self, lines: f32, settings: &ArcRotateSettings) {
        self.radius =
            (self.radius - lines * settings.zoom_speed).clamp(settings.min_radius, settings.max_radius);
    }
}

pub fn arc_rotate_controller(
    mut cameras: Query<(&mut Transform, &mut ArcRotateCamera)>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    config: Res<ViewerConfig>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let scroll = accumulate_scroll(&mut scroll_events);

    let Ok((mut transform, mut orbit)) = cameras.single_mut() else {
        return;
    };

    let settings = &config.arc_rotate;
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        orbit.orbit(mouse_delta, settings.orbit_sensitivity);
    }
    if scroll.abs() > f32::EPSILON {
        orbit.zoom(scroll, settings);
    }

    *transform = orbit.transform();
}
