use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

// Pixel deltas from trackpads are scaled down to roughly one line per notch.
const PIXELS_PER_LINE: f32 = 20.0;

/// Sum this frame's wheel events in line units.
pub fn accumulate_scroll(scroll_events: &mut EventReader<MouseWheel>) -> f32 {
    scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / PIXELS_PER_LINE,
        })
        .sum()
}
