use bevy::prelude::*;

use crate::engine::error::ViewerError;

#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub floor_spawned: bool,
    pub floor_prepared: bool,
    pub hotspots_discovered: bool,
    pub error: Option<ViewerError>,
}

impl LoadingProgress {
    /// True once loading can no longer make progress: hotspots are wired, or the floor was lost.
    pub fn is_settled(&self) -> bool {
        self.hotspots_discovered || self.error.is_some()
    }
}
