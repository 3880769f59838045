use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::camera::camera_motion::{CameraArrived, CameraMotion};
use crate::engine::camera::viewer_camera::ViewerCamera;
use crate::engine::config::viewer_config::{CameraMode, ViewerConfig};
use crate::engine::core::app_state::AppState;
use crate::engine::error::{ViewerError, ViewerErrorEvent};
use crate::engine::scene::skybox::{SkyboxState, SkyboxTextureRequest};
use crate::engine::scene::teardown::ViewerTeardown;
use crate::tools::hotspots::state::{
    HotspotPicked, HotspotRegistry, HotspotSelected, HotspotsReady,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the host page.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Viewer mutation requested over RPC, applied through the same events the
/// pointer and the loaders use.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    FocusHotspot(String),
    SetSkybox(Option<String>),
    Dispose,
}

/// Read-only view of the viewer handed to request handlers.
#[derive(Debug, Clone)]
pub struct ViewerSnapshot {
    pub state: AppState,
    pub camera_mode: CameraMode,
    pub camera_position: Option<Vec3>,
    pub camera_target: Option<Vec3>,
    pub hotspots: Vec<String>,
    pub skybox_texture: Option<String>,
    pub fps: f32,
}

/// Plugin establishing the RPC layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    forward_viewer_events,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Filled by the JS callback, drained once per frame.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC listener not installed");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Ownership moves to JS for the lifetime of the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Raw message received from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    diagnostics: Res<DiagnosticsStore>,
    state: Res<State<AppState>>,
    config: Option<Res<ViewerConfig>>,
    motion: Res<CameraMotion>,
    registry: Res<HotspotRegistry>,
    skybox_state: Res<SkyboxState>,
    cameras: Query<&Transform, With<ViewerCamera>>,
    mut picks: EventWriter<HotspotPicked>,
    mut skybox_requests: EventWriter<SkyboxTextureRequest>,
    mut teardowns: EventWriter<ViewerTeardown>,
) {
    let mut pending = Vec::new();
    for event in events.read() {
        debug!("Received RPC: {}", event.content);
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => pending.push(request),
            Err(parse_error) => warn!("Discarding malformed RPC message: {}", parse_error),
        }
    }
    if pending.is_empty() {
        return;
    }

    let snapshot = ViewerSnapshot {
        state: *state.get(),
        camera_mode: config.map(|c| c.camera).unwrap_or_default(),
        camera_position: cameras.single().ok().map(|xf| xf.translation),
        camera_target: motion.target(),
        hotspots: registry.names(),
        skybox_texture: skybox_state.texture_path.clone(),
        fps: smoothed_fps(&diagnostics),
    };

    let mut commands = Vec::new();
    for request in &pending {
        info!("Processing RPC method: {}", request.method);
        if let Some(response) = handle_rpc_request(request, &snapshot, &mut commands) {
            rpc_interface.queue_response(response);
        }
    }

    for command in commands {
        match command {
            ViewerCommand::FocusHotspot(name) => {
                if let Some(hotspot) = registry.get(&name) {
                    picks.write(HotspotPicked { hotspot });
                }
            }
            ViewerCommand::SetSkybox(texture) => {
                skybox_requests.write(SkyboxTextureRequest { texture });
            }
            ViewerCommand::Dispose => {
                teardowns.write(ViewerTeardown);
            }
        }
    }
}

/// Handle one request against a snapshot of the viewer.
///
/// Mutations are pushed onto `commands`; they run even when the request has
/// no ID and therefore gets no response.
pub fn handle_rpc_request(
    request: &RpcRequest,
    snapshot: &ViewerSnapshot,
    commands: &mut Vec<ViewerCommand>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "get_hotspots" => handle_get_hotspots(snapshot),
        "focus_hotspot" => handle_focus_hotspot(&request.params, snapshot, commands),
        "set_skybox" => handle_set_skybox(&request.params, snapshot, commands),
        "get_camera_state" => handle_get_camera_state(snapshot),
        "get_fps" => Ok(serde_json::json!({ "fps": snapshot.fps })),
        "dispose" => {
            commands.push(ViewerCommand::Dispose);
            Ok(serde_json::json!({ "success": true }))
        }
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError {
                code: -32601,
                message: "Method not found".to_string(),
                data: Some(serde_json::json!({ "method": request.method })),
            })
        }
    };

    let id = request.id.clone()?;
    Some(match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    })
}

fn handle_get_hotspots(snapshot: &ViewerSnapshot) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "count": snapshot.hotspots.len(),
        "names": snapshot.hotspots,
    }))
}

fn handle_focus_hotspot(
    params: &serde_json::Value,
    snapshot: &ViewerSnapshot,
    commands: &mut Vec<ViewerCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct FocusParams {
        name: String,
    }

    let focus = serde_json::from_value::<FocusParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'name' parameter"))?;

    require_running(snapshot)?;
    if !snapshot.hotspots.contains(&focus.name) {
        return Err(RpcError::from(&ViewerError::UnknownHotspot(focus.name)));
    }

    commands.push(ViewerCommand::FocusHotspot(focus.name.clone()));
    Ok(serde_json::json!({
        "success": true,
        "hotspot": focus.name
    }))
}

fn handle_set_skybox(
    params: &serde_json::Value,
    snapshot: &ViewerSnapshot,
    commands: &mut Vec<ViewerCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize, Default)]
    struct SkyboxParams {
        #[serde(default)]
        texture: Option<String>,
    }

    let skybox = if params.is_null() {
        SkyboxParams::default()
    } else {
        serde_json::from_value::<SkyboxParams>(params.clone())
            .map_err(|_| RpcError::invalid_params("Expected optional 'texture' string"))?
    };

    require_running(snapshot)?;
    commands.push(ViewerCommand::SetSkybox(skybox.texture.clone()));
    Ok(serde_json::json!({
        "success": true,
        "texture": skybox.texture
    }))
}

fn handle_get_camera_state(snapshot: &ViewerSnapshot) -> Result<serde_json::Value, RpcError> {
    let position = snapshot
        .camera_position
        .ok_or_else(|| RpcError::internal_error("Viewer camera not spawned"))?;

    Ok(serde_json::json!({
        "mode": snapshot.camera_mode,
        "state": snapshot.state.as_str(),
        "position": vec3_json(position),
        "target": snapshot.camera_target.map(vec3_json),
        "seeking": snapshot.camera_target.is_some(),
        "skybox_texture": snapshot.skybox_texture,
    }))
}

fn require_running(snapshot: &ViewerSnapshot) -> Result<(), RpcError> {
    if snapshot.state == AppState::Running {
        Ok(())
    } else {
        Err(RpcError::internal_error(&format!(
            "Viewer is {}, not running",
            snapshot.state.as_str()
        )))
    }
}

/// Push viewer events to the host page as notifications.
pub fn forward_viewer_events(
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut ready: EventReader<HotspotsReady>,
    mut selected: EventReader<HotspotSelected>,
    mut arrivals: EventReader<CameraArrived>,
    mut errors: EventReader<ViewerErrorEvent>,
) {
    for event in ready.read() {
        rpc_interface.send_notification(
            "hotspots_ready",
            serde_json::json!({ "count": event.names.len(), "names": event.names }),
        );
    }
    for event in selected.read() {
        rpc_interface.send_notification(
            "hotspot_selected",
            serde_json::json!({ "name": event.name, "target": vec3_json(event.target) }),
        );
    }
    for event in arrivals.read() {
        rpc_interface.send_notification(
            "camera_arrived",
            serde_json::json!({ "position": vec3_json(event.position) }),
        );
    }
    for ViewerErrorEvent(err) in errors.read() {
        rpc_interface.send_notification(
            "viewer_error",
            serde_json::json!({ "message": err.to_string() }),
        );
    }
}

pub fn smoothed_fps(diagnostics: &DiagnosticsStore) -> f32 {
    diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32
}

fn vec3_json(v: Vec3) -> serde_json::Value {
    serde_json::json!([v.x, v.y, v.z])
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Responses after notifications, so state updates land first.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

impl From<&ViewerError> for RpcError {
    fn from(err: &ViewerError) -> Self {
        match err {
            ViewerError::UnknownHotspot(name) => Self {
                data: Some(serde_json::json!({ "name": name })),
                ..Self::invalid_params(&err.to_string())
            },
            ViewerError::InvalidConfig(_) => Self::invalid_params(&err.to_string()),
            _ => Self::internal_error(&err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ViewerSnapshot {
        ViewerSnapshot {
            state: AppState::Running,
            camera_mode: CameraMode::Free,
            camera_position: Some(Vec3::new(0.0, 10.0, 0.0)),
            camera_target: None,
            hotspots: vec!["Engine".into(), "Bridge".into()],
            skybox_texture: Some("textures/Circle.jpg".into()),
            fps: 60.0,
        }
    }

    fn request(method: &str, params: serde_json::Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".into(),
            method: method.into(),
            params,
            id: Some(serde_json::json!(7)),
        }
    }

    fn call(req: &RpcRequest, snapshot: &ViewerSnapshot) -> (RpcResponse, Vec<ViewerCommand>) {
        let mut commands = Vec::new();
        let response = handle_rpc_request(req, snapshot, &mut commands).unwrap();
        (response, commands)
    }

    #[test]
    fn get_hotspots_lists_names_in_order() {
        let (response, commands) = call(&request("get_hotspots", serde_json::Value::Null), &snapshot());
        assert_eq!(response.id, Some(serde_json::json!(7)));
        assert_eq!(
            response.result,
            Some(serde_json::json!({ "count": 2, "names": ["Engine", "Bridge"] }))
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn focus_hotspot_queues_a_pick() {
        let (response, commands) = call(
            &request("focus_hotspot", serde_json::json!({ "name": "Bridge" })),
            &snapshot(),
        );
        assert!(response.error.is_none());
        assert_eq!(commands, vec![ViewerCommand::FocusHotspot("Bridge".into())]);
    }

    #[test]
    fn focus_on_unknown_hotspot_is_invalid_params() {
        let (response, commands) = call(
            &request("focus_hotspot", serde_json::json!({ "name": "Hold" })),
            &snapshot(),
        );
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(error.message, "unknown hotspot: Hold");
        assert_eq!(error.data, Some(serde_json::json!({ "name": "Hold" })));
        assert!(commands.is_empty());
    }

    #[test]
    fn focus_without_name_is_invalid_params() {
        let (response, _) = call(&request("focus_hotspot", serde_json::json!({})), &snapshot());
        assert_eq!(response.error.map(|e| e.code), Some(-32602));
    }

    #[test]
    fn focus_while_loading_is_rejected() {
        let loading = ViewerSnapshot {
            state: AppState::Loading,
            ..snapshot()
        };
        let (response, commands) = call(
            &request("focus_hotspot", serde_json::json!({ "name": "Engine" })),
            &loading,
        );
        assert_eq!(response.error.map(|e| e.code), Some(-32603));
        assert!(commands.is_empty());
    }

    #[test]
    fn set_skybox_without_params_restores_default() {
        let (_, commands) = call(&request("set_skybox", serde_json::Value::Null), &snapshot());
        assert_eq!(commands, vec![ViewerCommand::SetSkybox(None)]);

        let (_, commands) = call(
            &request("set_skybox", serde_json::json!({ "texture": "Engine" })),
            &snapshot(),
        );
        assert_eq!(commands, vec![ViewerCommand::SetSkybox(Some("Engine".into()))]);
    }

    #[test]
    fn camera_state_reports_position_and_target() {
        let seeking = ViewerSnapshot {
            camera_target: Some(Vec3::new(1.0, 51.0, 2.0)),
            ..snapshot()
        };
        let (response, _) = call(&request("get_camera_state", serde_json::Value::Null), &seeking);
        let result = response.result.unwrap();
        assert_eq!(result["mode"], "free");
        assert_eq!(result["position"], serde_json::json!([0.0, 10.0, 0.0]));
        assert_eq!(result["target"], serde_json::json!([1.0, 51.0, 2.0]));
        assert_eq!(result["seeking"], true);
    }

    #[test]
    fn unknown_method_is_method_not_found() {
        let (response, _) = call(&request("tool_selection", serde_json::Value::Null), &snapshot());
        assert_eq!(response.error.map(|e| e.code), Some(-32601));
    }

    #[test]
    fn dispose_notification_runs_without_response() {
        let notification = RpcRequest {
            id: None,
            ..request("dispose", serde_json::Value::Null)
        };
        let mut commands = Vec::new();
        assert!(handle_rpc_request(&notification, &snapshot(), &mut commands).is_none());
        assert_eq!(commands, vec![ViewerCommand::Dispose]);
    }

    #[test]
    fn missing_params_field_parses() {
        let parsed: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"get_fps","id":1}"#).unwrap();
        assert!(parsed.params.is_null());
    }

    #[test]
    fn load_errors_map_to_internal_error() {
        let err = ViewerError::FloorLoadTimeout {
            path: "meshes/Floor.glb".into(),
            secs: 30.0,
        };
        assert_eq!(RpcError::from(&err).code, -32603);
    }

    #[test]
    fn viewer_events_become_notifications() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<WebRpcInterface>()
            .add_event::<HotspotsReady>()
            .add_event::<HotspotSelected>()
            .add_event::<CameraArrived>()
            .add_event::<ViewerErrorEvent>()
            .add_systems(Update, forward_viewer_events);

        app.world_mut().send_event(HotspotSelected {
            name: "Engine".into(),
            target: Vec3::new(1.0, 2.0, 3.0),
        });
        app.world_mut().send_event(ViewerErrorEvent(ViewerError::ConfigLoad("bad json".into())));
        app.update();

        let rpc = app.world().resource::<WebRpcInterface>();
        let sent: Vec<_> = rpc
            .outgoing_notifications
            .iter()
            .map(|n| (n.method.as_str(), n.params.clone()))
            .collect();
        assert_eq!(
            sent,
            vec![
                (
                    "hotspot_selected",
                    serde_json::json!({ "name": "Engine", "target": [1.0, 2.0, 3.0] })
                ),
                (
                    "viewer_error",
                    serde_json::json!({ "message": "viewer config could not be loaded: bad json" })
                ),
            ]
        );
    }
}
