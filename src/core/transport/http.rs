//! HTTP transport implementation.
//!
//! JSON-RPC 2.0 over POST, with sessions keyed by the `mcp-session-id`
//! header:
//! - `initialize` opens a session and returns its id in that header
//! - requests naming an unknown session get 404
//! - requests without the header are served statelessly
//! - `DELETE` on the RPC path closes the session

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use http::{HeaderMap, HeaderValue, StatusCode};
use rmcp::model::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

use super::session::SessionStore;
use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::domains::tools::ToolError;

/// Header carrying the session id in both directions.
pub const SESSION_HEADER: &str = "mcp-session-id";

/// Protocol revisions this transport answers to, newest first.
const SUPPORTED_PROTOCOL_VERSIONS: [&str; 3] = ["2025-06-18", "2025-03-26", "2024-11-05"];

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    pub fn method_not_found(id: Option<Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }

    pub fn internal_error(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32603, msg)
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::error(None, -32700, msg)
    }

    pub fn session_not_found(id: Option<Value>) -> Self {
        Self::error(id, -32001, "Session not found")
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP server instance.
    server: McpServer,
    /// Live client sessions.
    sessions: SessionStore,
    /// JSON-RPC endpoint, reported by the info route.
    rpc_path: String,
}

impl AppState {
    pub fn new(server: McpServer, sessions: SessionStore, rpc_path: impl Into<String>) -> Self {
        Self {
            server,
            sessions,
            rpc_path: rpc_path.into(),
        }
    }
}

/// Build the axum router for `state`.
///
/// Routes: `POST`/`DELETE` on the RPC path, `POST` on `<rpc path>/sse`,
/// `GET /health` and `GET /`.
pub fn router(state: AppState, enable_cors: bool) -> Router {
    let rpc_path = state.rpc_path.clone();
    let sse_path = format!("{}/sse", rpc_path.trim_end_matches('/'));

    let app = Router::new()
        .route(&rpc_path, post(handle_rpc).delete(handle_close_session))
        .route(&sse_path, post(handle_rpc))
        .route("/health", get(health_check))
        .route("/", get(root_handler))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers([http::header::HeaderName::from_static(SESSION_HEADER)]);
        app.layer(cors)
    } else {
        app
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let state = AppState::new(server, SessionStore::new(), self.config.rpc_path.clone());
        let app = router(state, self.config.enable_cors);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Sim API MCP Server running on {} (JSON-RPC over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → MCP endpoint: POST http://{}{}", addr, self.config.rpc_path);
        info!("  → Health:       GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": state.rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0",
        "documentation": format!("Send POST requests to {} with JSON-RPC messages", state.rpc_path)
    }))
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "sessions": state.sessions.len().await,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = match decode_request(&body) {
        Ok(request) => request,
        Err(response) => {
            warn!("Rejected malformed JSON-RPC body: {:?}", response.error);
            return (StatusCode::BAD_REQUEST, Json(response)).into_response();
        }
    };

    tracing::Span::current().record("method", request.method.as_str());
    info!("Received JSON-RPC request: {}", request.method);

    let session = session_id(&headers);

    if request.method == "initialize" {
        return handle_initialize(&state, session.as_deref(), request).await;
    }

    if let Some(id) = &session {
        if !state.sessions.contains(id).await {
            warn!("Unknown session: {}", id);
            return (
                StatusCode::NOT_FOUND,
                Json(JsonRpcResponse::session_not_found(request.id)),
            )
                .into_response();
        }
    }

    if request.method.starts_with("notifications/") {
        handle_notification(&state, session.as_deref(), &request).await;
        return StatusCode::ACCEPTED.into_response();
    }

    let response = process_request(&state, request).await;
    (StatusCode::OK, Json(response)).into_response()
}

/// Decode a JSON-RPC request, answering `-32700` for bodies that are not JSON
/// and `-32600` for JSON that is not a request.
fn decode_request(body: &[u8]) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| JsonRpcResponse::parse_error(format!("Parse error: {}", e)))?;
    let id = value.get("id").cloned();
    serde_json::from_value(value).map_err(|e| {
        JsonRpcResponse::error(id, -32600, format!("Invalid Request: {}", e))
    })
}

/// Close a session.
#[instrument(skip_all)]
async fn handle_close_session(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(id) = session_id(&headers) else {
        return (StatusCode::BAD_REQUEST, "Missing mcp-session-id header").into_response();
    };

    if state.sessions.remove(&id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        warn!("Close requested for unknown session: {}", id);
        StatusCode::NOT_FOUND.into_response()
    }
}

/// Process a JSON-RPC request and return the response.
async fn process_request(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    match request.method.as_str() {
        "ping" => JsonRpcResponse::success(request.id, json!({})),
        "tools/list" => handle_tools_list(state, request).await,
        "tools/call" => handle_tools_call(state, request).await,
        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    }
}

fn negotiate_protocol_version(params: Option<&Value>) -> &'static str {
    let requested = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str);

    SUPPORTED_PROTOCOL_VERSIONS
        .iter()
        .copied()
        .find(|v| Some(*v) == requested)
        .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0])
}

/// Handle initialize request.
async fn handle_initialize(
    state: &AppState,
    requested_session: Option<&str>,
    request: JsonRpcRequest,
) -> Response {
    if request.jsonrpc != "2.0" {
        return (
            StatusCode::OK,
            Json(JsonRpcResponse::invalid_request(request.id)),
        )
            .into_response();
    }

    let protocol_version = negotiate_protocol_version(request.params.as_ref());
    debug!("Negotiated protocol version {}", protocol_version);
    let id = state
        .sessions
        .create(requested_session, protocol_version)
        .await;

    let result = json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": state.server.name(),
            "version": state.server.version()
        }
    });

    let mut response = (
        StatusCode::OK,
        Json(JsonRpcResponse::success(request.id, result)),
    )
        .into_response();
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(SESSION_HEADER, value);
    }
    response
}

/// Handle tools/list request.
async fn handle_tools_list(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/list request");

    match serde_json::to_value(state.server.list_tools()) {
        Ok(tools) => JsonRpcResponse::success(request.id, json!({ "tools": tools })),
        Err(e) => JsonRpcResponse::internal_error(request.id, e.to_string()),
    }
}

/// Handle tools/call request.
async fn handle_tools_call(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/call request");

    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id, "Missing params"),
    };

    let name = match params.get("name").and_then(|v| v.as_str()) {
        Some(n) => n.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id, "Missing tool name"),
    };

    let arguments: Option<JsonObject> = match params.get("arguments") {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map.clone()),
        Some(_) => {
            return JsonRpcResponse::invalid_params(request.id, "Tool arguments must be an object");
        }
    };

    match state.server.call_tool(&name, arguments).await {
        Ok(result) => match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::internal_error(request.id, e.to_string()),
        },
        Err(e @ ToolError::NotFound(_)) => JsonRpcResponse::invalid_params(request.id, e.to_string()),
        Err(e @ ToolError::InvalidArguments(_)) => {
            JsonRpcResponse::invalid_params(request.id, e.to_string())
        }
    }
}

/// Handle notifications (no response body).
async fn handle_notification(state: &AppState, session: Option<&str>, request: &JsonRpcRequest) {
    match (request.method.as_str(), session) {
        ("notifications/initialized", Some(id)) => {
            info!("Client sent initialized notification");
            state.sessions.mark_initialized(id).await;
        }
        _ => {
            info!("Received notification: {}", request.method);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::sim::SimClient;
    use axum::body::Body;
    use http::Request;
    use http_body_util::BodyExt;
    use httpmock::prelude::*;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with(base_url: &str, api_key: Option<&str>) -> (Router, SessionStore) {
        let client = SimClient::new(base_url, api_key.map(str::to_string), 5_000).unwrap();
        let server = McpServer::with_client(Config::default(), Arc::new(client));
        let sessions = SessionStore::new();
        let app = router(AppState::new(server, sessions.clone(), "/mcp"), true);
        (app, sessions)
    }

    fn app() -> (Router, SessionStore) {
        app_with("http://localhost:1", None)
    }

    fn rpc(method: &str, params: Value) -> Value {
        json!({ "jsonrpc": "2.0", "id": 1, "method": method, "params": params })
    }

    fn post(path: &str, session: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json");
        if let Some(id) = session {
            builder = builder.header(SESSION_HEADER, id);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn initialize(app: &Router, path: &str) -> String {
        let response = app
            .clone()
            .oneshot(post(path, None, rpc("initialize", json!({ "protocolVersion": "2024-11-05" }))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response
            .headers()
            .get(SESSION_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_initialize_opens_session() {
        let (app, sessions) = app();
        let response = app
            .clone()
            .oneshot(post("/mcp", None, rpc("initialize", json!({ "protocolVersion": "2024-11-05" }))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let id = response.headers().get(SESSION_HEADER).unwrap().to_str().unwrap().to_string();
        assert!(sessions.contains(&id).await);

        let body = body_json(response).await;
        assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(body["result"]["serverInfo"]["name"], "sim-api-mcp-server");
        assert!(body["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_unsupported_protocol_version_gets_latest() {
        let (app, _) = app();
        let response = app
            .oneshot(post("/mcp", None, rpc("initialize", json!({ "protocolVersion": "1999-01-01" }))))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["result"]["protocolVersion"], SUPPORTED_PROTOCOL_VERSIONS[0]);
    }

    #[tokio::test]
    async fn test_sse_alias_serves_rpc() {
        let (app, sessions) = app();
        let id = initialize(&app, "/mcp/sse").await;
        assert!(sessions.contains(&id).await);
    }

    #[tokio::test]
    async fn test_unknown_session_is_rejected() {
        let (app, _) = app();
        let response = app
            .oneshot(post("/mcp", Some("nope"), rpc("tools/list", json!({}))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], -32001);
    }

    #[tokio::test]
    async fn test_tools_list_in_session() {
        let (app, _) = app();
        let id = initialize(&app, "/mcp").await;

        let response = app
            .oneshot(post("/mcp", Some(&id), rpc("tools/list", json!({}))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let tools = body["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 7);
        assert_eq!(tools[0]["name"], "getBalances");
        assert_eq!(tools[0]["inputSchema"]["additionalProperties"], false);
        assert_eq!(tools[0]["annotations"]["readOnlyHint"], true);
    }

    #[tokio::test]
    async fn test_notification_marks_session_initialized() {
        let (app, sessions) = app();
        let id = initialize(&app, "/mcp").await;

        let notification = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
        let response = app
            .oneshot(post("/mcp", Some(&id), notification))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert!(sessions.get(&id).await.unwrap().initialized);
    }

    #[tokio::test]
    async fn test_delete_closes_session() {
        let (app, sessions) = app();
        let id = initialize(&app, "/mcp").await;

        let delete = |id: &str| {
            Request::builder()
                .method("DELETE")
                .uri("/mcp")
                .header(SESSION_HEADER, id)
                .body(Body::empty())
                .unwrap()
        };

        let response = app.clone().oneshot(delete(&id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(!sessions.contains(&id).await);

        let response = app.oneshot(delete(&id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stateless_tool_call_without_key() {
        let (app, _) = app();
        let response = app
            .oneshot(post(
                "/mcp",
                None,
                rpc("tools/call", json!({ "name": "getBalances", "arguments": { "address": "0xabc" } })),
            ))
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["result"]["isError"], true);
        let text = body["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Error: "));
        assert!(text.contains("SIM_API_KEY"));
    }

    #[tokio::test]
    async fn test_tool_call_success_omits_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/evm/balances/chains");
                then.status(200).json_body(json!({ "chains": [] }));
            })
            .await;

        let (app, _) = app_with(&server.base_url(), Some("secret"));
        let response = app
            .oneshot(post(
                "/mcp",
                None,
                rpc("tools/call", json!({ "name": "listSupportedChainsTokenBalances" })),
            ))
            .await
            .unwrap();

        let body = body_json(response).await;
        assert!(body["result"].get("isError").is_none());
        let text = body["result"]["content"][0]["text"].as_str().unwrap();
        assert_eq!(serde_json::from_str::<Value>(text).unwrap(), json!({ "chains": [] }));
    }

    #[tokio::test]
    async fn test_tool_call_errors() {
        let (app, _) = app();

        let unknown = app
            .clone()
            .oneshot(post("/mcp", None, rpc("tools/call", json!({ "name": "nope" }))))
            .await
            .unwrap();
        assert_eq!(body_json(unknown).await["error"]["code"], -32602);

        let invalid = app
            .clone()
            .oneshot(post(
                "/mcp",
                None,
                rpc("tools/call", json!({ "name": "getBalances", "arguments": { "wallet": "0x" } })),
            ))
            .await
            .unwrap();
        assert_eq!(body_json(invalid).await["error"]["code"], -32602);

        let method = app
            .oneshot(post("/mcp", None, rpc("resources/list", json!({}))))
            .await
            .unwrap();
        assert_eq!(body_json(method).await["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_malformed_bodies_get_json_rpc_errors() {
        let (app, _) = app();

        let request = Request::builder()
            .method("POST")
            .uri("/mcp")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["error"]["code"], -32700);

        let response = app
            .oneshot(post("/mcp", None, json!({ "jsonrpc": "2.0", "id": 7 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], -32600);
        assert_eq!(body["id"], 7);
    }

    #[tokio::test]
    async fn test_health_and_ping() {
        let (app, _) = app();
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "healthy");

        let response = app
            .oneshot(post("/mcp", None, rpc("ping", json!({}))))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["result"], json!({}));
    }
}
