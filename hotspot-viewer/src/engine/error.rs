use bevy::prelude::*;
use thiserror::Error;

/// Failures the viewer reports instead of silently degrading.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewerError {
    #[error("floor mesh '{path}' failed to load: {reason}")]
    FloorLoad { path: String, reason: String },

    #[error("floor mesh '{path}' did not finish loading within {secs:.1}s")]
    FloorLoadTimeout { path: String, secs: f32 },

    #[error("viewer config could not be loaded: {0}")]
    ConfigLoad(String),

    #[error("invalid viewer config: {0}")]
    InvalidConfig(String),

    #[error("unknown hotspot: {0}")]
    UnknownHotspot(String),
}

pub type ViewerResult<T> = Result<T, ViewerError>;

/// Broadcast whenever a [`ViewerError`] is raised so the web bridge can forward it.
#[derive(Event, Debug, Clone)]
pub struct ViewerErrorEvent(pub ViewerError);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_names_path_and_duration() {
        let err = ViewerError::FloorLoadTimeout {
            path: "meshes/Floor.glb".into(),
            secs: 30.0,
        };
        assert_eq!(
            err.to_string(),
            "floor mesh 'meshes/Floor.glb' did not finish loading within 30.0s"
        );
    }
}
