use bevy::prelude::*;

use crate::constants::viewer_defaults::AMBIENT_BRIGHTNESS_SCALE;
use crate::engine::config::viewer_config::ViewerConfig;

/// Single soft light from above, approximated by ambient light.
pub fn spawn_lighting(mut commands: Commands, config: Res<ViewerConfig>) {
    commands.insert_resource(ambient_light(config.light_intensity));
}

pub fn ambient_light(intensity: f32) -> AmbientLight {
    AmbientLight {
        color: Color::WHITE,
        brightness: intensity * AMBIENT_BRIGHTNESS_SCALE,
        ..default()
    }
}
