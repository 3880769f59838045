use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy::window::PrimaryWindow;

use crate::engine::camera::viewer_camera::ViewerCamera;
use crate::tools::hotspots::ray::nearest_hotspot;
use crate::tools::hotspots::state::{HotspotPart, HotspotPicked, HotspotPointerEvent, HoverState};

/// Cast the cursor ray against hotspot parts every frame.
///
/// Emits enter / exit as the hovered hotspot changes and a pick when the left
/// button is pressed and released over the same hotspot. A press that turns
/// into a camera drag does not pick.
pub fn hotspot_pointer_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<ViewerCamera>>,
    parts: Query<(&HotspotPart, &GlobalTransform, &Aabb, &InheritedVisibility)>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut hover: ResMut<HoverState>,
    mut pointer_events: EventWriter<HotspotPointerEvent>,
    mut picks: EventWriter<HotspotPicked>,
) {
    let hovered = hovered_hotspot(&windows, &cameras, &parts);

    for event in hover.update(hovered).into_iter().flatten() {
        pointer_events.write(event);
    }

    let travelled: f32 = mouse_motion.read().map(|m| m.delta.length()).sum();

    if buttons.just_pressed(MouseButton::Left) {
        hover.press(hovered);
    } else if buttons.pressed(MouseButton::Left) || buttons.just_released(MouseButton::Left) {
        hover.drag(travelled);
    }
    if buttons.just_released(MouseButton::Left) {
        if let Some(hotspot) = hover.release(hovered) {
            picks.write(HotspotPicked { hotspot });
        }
    }
}

fn hovered_hotspot(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<ViewerCamera>>,
    parts: &Query<(&HotspotPart, &GlobalTransform, &Aabb, &InheritedVisibility)>,
) -> Option<Entity> {
    let window = windows.single().ok()?;
    let cursor_pos = window.cursor_position()?;
    let (camera, cam_xf) = cameras.single().ok()?;
    let ray = camera.viewport_to_world(cam_xf, cursor_pos).ok()?;

    nearest_hotspot(
        ray.origin,
        ray.direction.as_vec3(),
        parts
            .iter()
            .filter(|(_, _, _, visibility)| visibility.get())
            .map(|(part, xf, aabb, _)| (part.hotspot, xf, aabb)),
    )
}
