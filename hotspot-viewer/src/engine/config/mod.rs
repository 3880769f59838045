//! Viewer configuration loaded from an optional JSON asset.
//!
//! A single config surface selects the camera behaviour and whether hotspots
//! are interactive, and exposes the tuning values for camera motion, floor
//! placement and skybox textures. Every field has a default so partial files
//! are valid and a missing file falls back to the built-in viewer.

/// Config asset type, defaults and validation.
pub mod viewer_config;

/// Startup loading of `viewer.json` and the transition out of `Configuring`.
pub mod config_loader;
