//! Interactive tools layered on top of the viewer scene.
//!
//! Hotspots are the only tool: hovering outlines them, picking one moves the
//! camera above it and swaps the skybox panorama. The host page can trigger
//! the same pick through the `focus_hotspot` RPC method.

/// Hotspot discovery, picking, hover highlight and pick handling.
pub mod hotspots;
