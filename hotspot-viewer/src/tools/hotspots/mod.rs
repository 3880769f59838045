//! Clickable hotspots discovered in the floor scene.
//!
//! ## Flow
//!
//! ```text
//! floor spawned ─> discover_hotspots ─> Hotspot / HotspotPart components
//!
//! cursor ray ─> hotspot_pointer_system ─┬─> HotspotPointerEvent ─> HighlightLayer ─> wireframes
//!                                       └─> HotspotPicked ─┬─> CameraMotion::seek
//!                                                          └─> SkyboxTextureRequest
//! ```
//!
//! A hotspot is a direct child of the `Hotspots` node. Its mesh entities are
//! its parts: rays are cast against their bounding boxes and the outline is
//! drawn on them, while the hotspot entity itself owns the name and world
//! position used as the camera target.

/// Hotspot tagging after the floor loads.
pub mod discovery;

/// Highlight outline rendering.
pub mod highlight;

/// Pick and hover handlers.
pub mod interaction;

/// Cursor ray casting and pointer event generation.
pub mod picking;

/// Slab-method ray intersection against transformed bounding boxes.
pub mod ray;

/// Components, resources and events shared by the hotspot systems.
pub mod state;

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;
use interaction::{handle_hotspot_hover, handle_hotspot_picks};
use highlight::sync_highlight_wireframes;
use picking::hotspot_pointer_system;
use state::{
    HighlightLayer, HotspotPicked, HotspotPointerEvent, HotspotRegistry, HotspotSelected,
    HotspotsReady, HoverState,
};

pub struct HotspotPlugin;

impl Plugin for HotspotPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HotspotRegistry>()
            .init_resource::<HighlightLayer>()
            .init_resource::<HoverState>()
            .add_event::<HotspotPicked>()
            .add_event::<HotspotPointerEvent>()
            .add_event::<HotspotsReady>()
            .add_event::<HotspotSelected>()
            .add_systems(
                Update,
                (
                    hotspot_pointer_system,
                    handle_hotspot_hover,
                    handle_hotspot_picks,
                    sync_highlight_wireframes,
                )
                    .chain()
                    .run_if(in_state(AppState::Running)),
            );
    }
}
