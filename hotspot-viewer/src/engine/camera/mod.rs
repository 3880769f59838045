//! Viewer camera spawning, hotspot seeking and user navigation.
//!
//! One camera exists per viewer. Its mode comes from the config: a free
//! mouse-look camera or an arc-rotate orbit camera. Both share the same
//! seeking state machine that eases the camera towards picked hotspots.

/// Idle / Seeking state machine and the per-frame interpolation step.
pub mod camera_motion;

/// Orbit camera around a focus point with drag-to-orbit and wheel zoom.
pub mod arc_rotate;

/// Mouse-look camera with wheel dolly and no keyboard input.
pub mod free_camera;

/// Mouse input helpers shared by both controllers.
pub mod input;

/// Camera spawning for the configured mode.
pub mod viewer_camera;
