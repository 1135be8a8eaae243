use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::api::GalaxyControl;
use crate::engine::camera::reset_animation::CameraResetCompleted;
use crate::engine::core::app_state::{GalaxyData, LabelSyncStats};
use crate::engine::core::frame::GalaxyFrameSet;
use crate::engine::systems::fps_tracking::current_fps;
use crate::error::GalaxyError;
use crate::galaxy::clusters::cluster_catalogue;
use crate::galaxy::filter::FilterCriteriaParams;
use crate::galaxy::item::items_from_json;
use crate::tools::selection::WordSelected;

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
    pub params: Value,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<Value>,
    pub error: Option<RpcError>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<Value>,
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
    pub fn send_notification(&mut self, method: &str, params: Value) {
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
}

/// Plugin establishing the JSON-RPC bridge for iframe or embedded-canvas deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .in_set(GalaxyFrameSet::Input),
            )
            .add_systems(
                Update,
                (
                    notify_word_selected,
                    notify_camera_reset_completed,
                    notify_labels_synced.run_if(resource_changed::<LabelSyncStats>),
                    notify_clusters_updated.run_if(resource_changed::<GalaxyData>),
                    send_outgoing_messages,
                )
                    .chain()
                    .after(GalaxyFrameSet::Project),
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
        // Only string payloads that look like JSON-RPC are queued.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

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

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Exclusive so handlers can call `GalaxyControl` on the world directly.
fn handle_rpc_messages(world: &mut World) {
    let messages: Vec<String> = world
        .resource_mut::<Events<IncomingRpcMessage>>()
        .drain()
        .map(|event| event.content)
        .collect();

    for content in messages {
        handle_rpc_message(&content, world);
    }
}

fn send_debug_message(world: &mut World, message: String) {
    world
        .resource_mut::<WebRpcInterface>()
        .send_notification("debug_message", json!({ "message": message }));
}

fn handle_rpc_message(content: &str, world: &mut World) {
    send_debug_message(world, format!("Received RPC: {}", content));

    let value = match serde_json::from_str::<Value>(content) {
        Ok(value) => value,
        Err(parse_error) => {
            send_debug_message(world, format!("Parse error: {}", parse_error));
            return;
        }
    };
    let id = value.get("id").filter(|id| !id.is_null()).cloned();

    let request = match serde_json::from_value::<RpcRequest>(value) {
        Ok(request) if request.jsonrpc == "2.0" => request,
        _ => {
            warn!("Invalid RPC request: {}", content);
            if let Some(id) = id {
                let response = create_error_response(id, -32600, "Invalid request", None);
                world
                    .resource_mut::<WebRpcInterface>()
                    .queue_response(response);
            }
            return;
        }
    };

    send_debug_message(world, format!("Processing method: {}", request.method));
    if let Some(response) = handle_rpc_request(&request, world) {
        world
            .resource_mut::<WebRpcInterface>()
            .queue_response(response);
    }
}

/// Execute one request. Requests without an id still run but get no response.
fn handle_rpc_request(request: &RpcRequest, world: &mut World) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "update_data" => handle_update_data(&request.params, world),
        "apply_filters" => handle_apply_filters(&request.params, world),
        "set_component_filter" => handle_set_component_filter(&request.params, world),
        "clear_component_filter" => handle_clear_component_filter(world),
        "reset_camera" => handle_reset_camera(world),
        "get_clusters" => handle_get_clusters(world),
        "get_label_stats" => handle_get_label_stats(world),
        "get_fps" => handle_get_fps(world),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return request.id.clone().map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(json!({"method": request.method})),
                )
            });
        }
    };

    let id = request.id.clone()?;
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

/// Replace the collection with the supplied word records.
fn handle_update_data(params: &Value, world: &mut World) -> Result<Value, RpcError> {
    #[derive(Deserialize)]
    struct UpdateDataParams {
        words: Value,
    }

    let parsed = serde_json::from_value::<UpdateDataParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'words' array"))?;
    let items = items_from_json(parsed.words)?;
    let count = items.len();

    world.update_data(items);
    let generation = world.resource::<GalaxyData>().generation;

    Ok(json!({
        "success": true,
        "count": count,
        "generation": generation
    }))
}

/// Replace the filter criteria. An omitted `component` keeps the current
/// drill-down token; an explicit null clears it.
fn handle_apply_filters(params: &Value, world: &mut World) -> Result<Value, RpcError> {
    let params = if params.is_null() { json!({}) } else { params.clone() };

    let component = match params.get("component") {
        None => world.filter_criteria().component.clone(),
        Some(Value::Null) => None,
        Some(Value::String(token)) => Some(token.clone()),
        Some(_) => {
            return Err(RpcError::invalid_params(
                "'component' must be a string or null",
            ));
        }
    };

    let criteria = serde_json::from_value::<FilterCriteriaParams>(params)
        .map_err(|e| RpcError::invalid_params(&format!("Invalid filter params: {}", e)))?
        .into_criteria(component)?;

    world.apply_filters(criteria);

    Ok(active_filters(world))
}

fn handle_set_component_filter(params: &Value, world: &mut World) -> Result<Value, RpcError> {
    #[derive(Deserialize)]
    struct ComponentParams {
        component: String,
    }

    let parsed = serde_json::from_value::<ComponentParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'component' parameter"))?;

    world.set_component_filter(Some(parsed.component));

    Ok(active_filters(world))
}

fn handle_clear_component_filter(world: &mut World) -> Result<Value, RpcError> {
    world.set_component_filter(None);
    Ok(active_filters(world))
}

/// Success payload echoing the criteria now in force, in control-value form.
fn active_filters(world: &World) -> Value {
    let criteria = world.filter_criteria();
    json!({
        "success": true,
        "criteria": FilterCriteriaParams::from(criteria),
        "component": criteria.component
    })
}

fn handle_reset_camera(world: &mut World) -> Result<Value, RpcError> {
    world.request_camera_reset();
    Ok(json!({ "success": true }))
}

fn handle_get_clusters(world: &mut World) -> Result<Value, RpcError> {
    let data = world.resource::<GalaxyData>();
    let clusters = cluster_catalogue(data.items.iter().map(|item| item.as_ref()));

    Ok(json!({ "clusters": clusters }))
}

fn handle_get_label_stats(world: &mut World) -> Result<Value, RpcError> {
    let stats = *world.resource::<LabelSyncStats>();
    serde_json::to_value(stats).map_err(|e| RpcError::internal_error(&e.to_string()))
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(world: &mut World) -> Result<Value, RpcError> {
    let fps = world
        .get_resource::<DiagnosticsStore>()
        .and_then(current_fps)
        .unwrap_or(0.0) as f32;

    Ok(json!({ "fps": fps }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: Value,
    code: i32,
    message: &str,
    data: Option<Value>,
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

fn notify_word_selected(
    mut selected: EventReader<WordSelected>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in selected.read() {
        match serde_json::to_value(event.item.as_ref()) {
            Ok(word) => rpc_interface.send_notification("word_selected", json!({ "word": word })),
            Err(e) => error!("Failed to serialize selected word: {}", e),
        }
    }
}

fn notify_camera_reset_completed(
    mut completed: EventReader<CameraResetCompleted>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for _ in completed.read() {
        rpc_interface.send_notification("camera_reset_completed", json!({}));
    }
}

fn notify_labels_synced(stats: Res<LabelSyncStats>, mut rpc_interface: ResMut<WebRpcInterface>) {
    rpc_interface.send_notification(
        "labels_synced",
        json!({
            "visible": stats.visible,
            "total": stats.total,
            "generation": stats.generation
        }),
    );
}

fn notify_clusters_updated(data: Res<GalaxyData>, mut rpc_interface: ResMut<WebRpcInterface>) {
    let clusters = cluster_catalogue(data.items.iter().map(|item| item.as_ref()));
    rpc_interface.send_notification("clusters_updated", json!({ "clusters": clusters }));
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

impl From<GalaxyError> for RpcError {
    fn from(error: GalaxyError) -> Self {
        match &error {
            GalaxyError::UnknownFilterValue { field, value } => Self {
                code: -32602,
                message: error.to_string(),
                data: Some(json!({ "field": field, "value": value })),
            },
            GalaxyError::InvalidPayload(_) => Self::invalid_params(&error.to_string()),
            GalaxyError::SurfaceUnavailable(_) => Self::internal_error(&error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::core::app_setup::insert_galaxy_resources;
    use crate::engine::core::app_state::GalaxyFilters;
    use crate::engine::core::settings::GalaxySettings;
    use crate::galaxy::filter::{DateBucket, SrsBucket};

    fn rpc_world() -> World {
        let mut app = App::new();
        insert_galaxy_resources(&mut app, GalaxySettings::default());
        app.init_resource::<WebRpcInterface>();
        std::mem::take(app.world_mut())
    }

    fn call(world: &mut World, method: &str, params: Value) -> RpcResponse {
        let request = RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(json!(1)),
        };
        handle_rpc_request(&request, world).expect("requests with an id get a response")
    }

    fn error_code(response: &RpcResponse) -> Option<i32> {
        response.error.as_ref().map(|error| error.code)
    }

    #[test]
    fn update_data_then_list_clusters() {
        let mut world = rpc_world();
        let response = call(
            &mut world,
            "update_data",
            json!({"words": [
                {"id": 1, "word": {"thai": "ข้าว"}, "cluster_id": 2, "cluster_label": "Food"},
                {"id": 2, "word": {"thai": "น้ำ"}, "cluster_id": "2"},
                {"id": 3, "word": {"thai": "รถ"}, "cluster_id": 5}
            ]}),
        );
        assert_eq!(response.result.unwrap()["count"], 3);

        let clusters = call(&mut world, "get_clusters", Value::Null).result.unwrap();
        assert_eq!(
            clusters["clusters"],
            json!([
                {"id": "2", "label": "Food"},
                {"id": "5", "label": "Cluster 5"}
            ])
        );
    }

    #[test]
    fn apply_filters_keeps_component_unless_given() {
        let mut world = rpc_world();
        call(&mut world, "set_component_filter", json!({"component": "ก"}));

        let response = call(
            &mut world,
            "apply_filters",
            json!({"cluster": "all", "type": "noun", "srsLevel": "4-6", "reviewDate": "never"}),
        );
        assert!(response.error.is_none());
        let echoed = response.result.unwrap();
        assert_eq!(echoed["criteria"]["srsLevel"], "4-6");
        assert_eq!(echoed["criteria"]["type"], "noun");
        assert_eq!(echoed["component"], "ก");
        let criteria = &world.resource::<GalaxyFilters>().criteria;
        assert_eq!(criteria.component.as_deref(), Some("ก"));
        assert_eq!(criteria.srs_level, SrsBucket::FourToSix);
        assert_eq!(criteria.review_date, DateBucket::Never);

        call(&mut world, "apply_filters", json!({"component": null}));
        assert_eq!(world.resource::<GalaxyFilters>().criteria.component, None);
    }

    #[test]
    fn unknown_bucket_is_invalid_params() {
        let mut world = rpc_world();
        let response = call(&mut world, "apply_filters", json!({"addDate": "decade"}));
        assert_eq!(error_code(&response), Some(-32602));
        assert!(world.resource::<GalaxyFilters>().criteria.is_neutral());
    }

    #[test]
    fn malformed_words_are_invalid_params() {
        let mut world = rpc_world();
        let response = call(&mut world, "update_data", json!({"words": {"id": 1}}));
        assert_eq!(error_code(&response), Some(-32602));
        assert_eq!(world.resource::<GalaxyData>().generation, 0);
    }

    #[test]
    fn unknown_method_is_reported() {
        let mut world = rpc_world();
        let response = call(&mut world, "tool_selection", json!({}));
        assert_eq!(error_code(&response), Some(-32601));
    }

    #[test]
    fn requests_without_id_run_silently() {
        let mut world = rpc_world();
        let request = RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: "set_component_filter".to_string(),
            params: json!({"component": "ข"}),
            id: None,
        };

        assert!(handle_rpc_request(&request, &mut world).is_none());
        assert_eq!(
            world.resource::<GalaxyFilters>().criteria.component.as_deref(),
            Some("ข")
        );
    }

    #[test]
    fn wrong_protocol_version_is_invalid_request() {
        let mut world = rpc_world();
        handle_rpc_message(
            r#"{"jsonrpc": "1.0", "method": "reset_camera", "id": 9}"#,
            &mut world,
        );

        let rpc = world.resource::<WebRpcInterface>();
        assert_eq!(rpc.outgoing_responses.len(), 1);
        assert_eq!(error_code(&rpc.outgoing_responses[0]), Some(-32600));
    }

    #[test]
    fn label_stats_are_reported() {
        let mut world = rpc_world();
        *world.resource_mut::<LabelSyncStats>() = LabelSyncStats {
            visible: 4,
            total: 9,
            generation: 2,
        };

        let stats = call(&mut world, "get_label_stats", Value::Null).result.unwrap();
        assert_eq!(stats, json!({"visible": 4, "total": 9, "generation": 2}));
    }
}
