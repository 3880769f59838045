use bevy::color::Color;

pub const HIGHLIGHT_COLOUR: Color = Color::WHITE;

/// Longitude and latitude segments for the skybox sphere.
pub const SKYBOX_SECTORS: u32 = 64;
pub const SKYBOX_STACKS: u32 = 32;

/// Minimum interval between FPS notifications sent to the host page.
pub const FPS_NOTIFICATION_INTERVAL_SECS: f32 = 0.5;
