//! Scene content owned by one viewer instance.
//!
//! The camera, skybox and floor root are tracked in [`viewer_scene::ViewerScene`]
//! so teardown can dispose exactly what bootstrap created.

/// Entity handles created at bootstrap.
pub mod viewer_scene;

/// Floor preparation after the glTF scene is spawned: ground node hiding.
pub mod floor;

/// Ambient lighting.
pub mod lighting;

/// Skybox sphere and its swappable panorama material.
///
/// Every swap removes the previous material from the asset store, so repeated
/// hotspot picks never accumulate materials.
pub mod skybox;

/// Explicit disposal of the viewer's entities, assets and interaction state.
pub mod teardown;
