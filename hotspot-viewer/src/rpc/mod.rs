//! JSON-RPC 2.0 bridge between the viewer and its host page.
//!
//! The viewer runs inside an iframe on the web; the host page drives it and
//! listens to it through `postMessage`. Native builds compile the same layer
//! with a no-op transport so the request handling stays testable.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Viewer (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ handle_rpc_request()
//!        │                                        ├─ ViewerCommand -> ECS events
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! Requests without an ID are still executed; they simply get no response.
//!
//! ## Requests
//!
//! - `get_hotspots`: names of the discovered hotspots, in scene order
//! - `focus_hotspot { name }`: same as clicking the hotspot
//! - `set_skybox { texture? }`: swap the panorama; omit `texture` for the default
//! - `get_camera_state`: camera mode, position and seeking target
//! - `get_fps`: smoothed frame rate
//! - `dispose`: tear the viewer down
//!
//! ## Notifications
//!
//! - `loading_state { state }`: lifecycle state changed
//! - `hotspots_ready { count, names }`: discovery finished
//! - `hotspot_selected { name, target }`: a pick started a camera move
//! - `camera_arrived { position }`: the camera reached its target
//! - `viewer_error { message }`: a load or config failure
//! - `fps_update { fps }`: periodic frame rate
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params (including unknown hotspot names)
//! - `-32603`: Internal error (including requests made before the viewer runs)

/// JSON-RPC 2.0 messages, request dispatch and the postMessage transport.
pub mod web_rpc;
