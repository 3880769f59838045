//! Asset loading for the floor scene.
//!
//! Starts the glTF floor import, polls its load state each frame and settles
//! it as spawned, failed or timed out. Progress flags drive the transition
//! out of the `Loading` state.

/// Floor scene import, readiness observer and failure / timeout handling.
pub mod floor_loader;

/// Loading progress tracking resource for state transitions.
///
/// Monitors floor spawn, floor preparation and hotspot discovery.
pub mod progress;
