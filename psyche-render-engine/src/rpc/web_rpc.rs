use crate::engine::core::app_state::AppState;
use crate::engine::scene::lifecycle::SceneObjectRegistry;
use crate::engine::scene::named_object::SceneObjectKey;
use crate::view::ui_visibility::ui_visibility;
use crate::view::view_events::{InputSource, InstrumentToggleEvent, OrbitSelectionEvent};
use crate::view::view_state::{Instrument, Orbit, ViewState};
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

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
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the host page and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    #[cfg(test)]
    pub(crate) fn queued_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }
}

/// Plugin establishing the postMessage bridge to the embedding page.
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

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Attempt JSON parsing to validate RPC format before queuing.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
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

    // Write events using the non-deprecated method.
    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Resources and event writers reachable from RPC methods.
#[derive(SystemParam)]
struct RpcTargets<'w> {
    diagnostics: Res<'w, DiagnosticsStore>,
    app_state: Res<'w, State<AppState>>,
    view_state: Res<'w, ViewState>,
    registry: Res<'w, SceneObjectRegistry>,
    orbit_events: EventWriter<'w, OrbitSelectionEvent>,
    instrument_events: EventWriter<'w, InstrumentToggleEvent>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut targets: RpcTargets,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                if let Some(response) = handle_rpc_request(&request, &mut targets) {
                    rpc_interface.queue_response(response);
                }
            }
            // Outside an iframe the parent is this window, so our own responses come back.
            Err(_) if serde_json::from_str::<RpcResponse>(&event.content).is_ok() => {}
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
fn handle_rpc_request(request: &RpcRequest, targets: &mut RpcTargets) -> Option<RpcResponse> {
    // Only generate responses for requests with IDs (notifications have no ID).
    let id = request.id.clone()?;

    let result = match request.method.as_str() {
        "select_orbit" => handle_select_orbit(&request.params, targets),
        "toggle_instrument" => handle_toggle_instrument(&request.params, targets),
        "get_view_state" => Ok(handle_get_view_state(&targets.view_state, &targets.registry)),
        "get_fps" => handle_get_fps(&targets.diagnostics),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

/// Extract the orbit from `{"orbit": "A"}`. Accepts host button ids such as `"orbitB"`.
pub fn parse_select_orbit_params(params: &serde_json::Value) -> Result<Orbit, RpcError> {
    #[derive(serde::Deserialize)]
    struct SelectOrbitParams {
        orbit: String,
    }

    let orbit_params = serde_json::from_value::<SelectOrbitParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'orbit' parameter"))?;

    Orbit::from_string(&orbit_params.orbit)
        .ok_or_else(|| RpcError::invalid_params(&format!("Unknown orbit: {}", orbit_params.orbit)))
}

/// Extract the instrument from `{"instrument": "imager"}`.
pub fn parse_toggle_instrument_params(params: &serde_json::Value) -> Result<Instrument, RpcError> {
    #[derive(serde::Deserialize)]
    struct ToggleInstrumentParams {
        instrument: String,
    }

    let instrument_params = serde_json::from_value::<ToggleInstrumentParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'instrument' parameter"))?;

    Instrument::from_string(&instrument_params.instrument).ok_or_else(|| {
        RpcError::invalid_params(&format!(
            "Unknown instrument: {}",
            instrument_params.instrument
        ))
    })
}

fn ensure_running(app_state: &State<AppState>) -> Result<(), RpcError> {
    if *app_state.get() == AppState::Running {
        Ok(())
    } else {
        Err(RpcError::internal_error("Scene is still loading"))
    }
}

/// Queue an orbit change. The transition itself is applied by the view systems.
fn handle_select_orbit(
    params: &serde_json::Value,
    targets: &mut RpcTargets,
) -> Result<serde_json::Value, RpcError> {
    let orbit = parse_select_orbit_params(params)?;
    ensure_running(&targets.app_state)?;

    targets.orbit_events.write(OrbitSelectionEvent {
        orbit,
        source: InputSource::Rpc,
    });
    info!("Orbit selection event dispatched: {}", orbit.as_str());

    Ok(serde_json::json!({
        "success": true,
        "orbit": orbit.as_str(),
        "changed": targets.view_state.current_orbit() != orbit,
    }))
}

fn handle_toggle_instrument(
    params: &serde_json::Value,
    targets: &mut RpcTargets,
) -> Result<serde_json::Value, RpcError> {
    let instrument = parse_toggle_instrument_params(params)?;
    ensure_running(&targets.app_state)?;

    targets.instrument_events.write(InstrumentToggleEvent {
        instrument,
        source: InputSource::Rpc,
    });
    info!("Instrument toggle event dispatched: {}", instrument.as_str());

    Ok(serde_json::json!({
        "success": true,
        "instrument": instrument.as_str(),
        "owned_by_current_orbit":
            targets.view_state.current_orbit().instrument() == Some(instrument),
    }))
}

/// Current orbit, overlay, UI visibility and which scene objects are live.
pub fn handle_get_view_state(
    view_state: &ViewState,
    registry: &SceneObjectRegistry,
) -> serde_json::Value {
    let objects: serde_json::Map<String, serde_json::Value> = SceneObjectKey::ALL
        .iter()
        .map(|key| {
            let status = if registry.live(*key).is_some() {
                "live"
            } else if registry.is_pending(*key) {
                "loading"
            } else {
                "absent"
            };
            (key.id().to_string(), serde_json::json!(status))
        })
        .collect();

    serde_json::json!({
        "view": view_state.to_json(),
        "ui": ui_visibility(view_state.current_orbit()).to_json(),
        "objects": objects,
        "live_objects": registry.live_count(),
    })
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
    }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the embedding window.
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
        // No-op for non-WASM targets.
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
