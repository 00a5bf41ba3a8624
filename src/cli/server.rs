//! HTTP server mode for REST API access to connector operations

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{credential_type, test_credentials, Credentials};
use crate::config::ConnectorConfig;
use crate::description::node_description;
use crate::engine::{Dispatcher, ExecutionConfig, OutputRecord};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::operation::OperationSelector;
use crate::types::JsonValue;

/// Server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// HTTP client settings for outgoing calls
    pub http: HttpClientConfig,
    /// Credentials used when a request does not carry its own
    pub credentials: Credentials,
}

impl From<&ConnectorConfig> for ServerConfig {
    fn from(config: &ConnectorConfig) -> Self {
        Self {
            http: config.http_client_config(),
            credentials: config.credentials.clone(),
        }
    }
}

/// App state shared across handlers
#[derive(Clone)]
struct AppState {
    config: ServerConfig,
}

/// Request body for the check endpoint
#[derive(Debug, Default, Deserialize)]
struct CheckRequest {
    #[serde(default)]
    credentials: Option<Credentials>,
}

/// Request body for the execute endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteRequest {
    #[serde(default)]
    credentials: Option<Credentials>,
    resource: String,
    operation: String,
    /// Input items; an empty list runs a single empty item
    #[serde(default)]
    items: Vec<JsonValue>,
    #[serde(default, alias = "continue_on_fail")]
    continue_on_fail: bool,
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    item_index: Option<usize>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            item_index: None,
        }
    }
}

impl ApiResponse<()> {
    fn error(err: &Error) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(err.to_string()),
            item_index: err.item_index(),
        }
    }
}

/// HTTP status for an error raised while serving a request
fn error_status(err: &Error) -> StatusCode {
    if err.is_input_error() {
        return StatusCode::BAD_REQUEST;
    }
    match err {
        Error::CredentialTest { .. } => StatusCode::UNAUTHORIZED,
        Error::Config { .. } | Error::InvalidUrl(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn error_response(err: &Error) -> Response {
    (error_status(err), Json(ApiResponse::error(err))).into_response()
}

/// Build the router
pub fn router(config: ServerConfig) -> Router {
    let state = AppState { config };

    // Build CORS layer - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/description", get(description))
        .route("/check", post(check_connection))
        .route("/execute", post(execute))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, port: u16) -> Result<()> {
    let app = router(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Form and credential description
async fn description() -> impl IntoResponse {
    Json(ApiResponse::success(json!({
        "node": node_description(),
        "credential": credential_type()
    })))
}

fn client_for(state: &AppState, credentials: Option<Credentials>) -> Result<HttpClient> {
    let credentials = credentials.unwrap_or_else(|| state.config.credentials.clone());
    HttpClient::with_config(credentials, state.config.http.clone())
}

/// Test credentials
async fn check_connection(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CheckRequest>>,
) -> Response {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let client = match client_for(&state, req.credentials) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };

    match test_credentials(&client).await {
        Ok(()) => Json(ApiResponse::success(json!({
            "status": "SUCCEEDED",
            "message": "Connection successful"
        })))
        .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Run one operation over a batch of items
async fn execute(State(state): State<Arc<AppState>>, Json(req): Json<ExecuteRequest>) -> Response {
    let selector = match OperationSelector::parse(&req.resource, &req.operation) {
        Ok(s) => s,
        Err(e) => return error_response(&e),
    };

    let client = match client_for(&state, req.credentials) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };

    let items = if req.items.is_empty() {
        vec![json!({})]
    } else {
        req.items
    };

    let dispatcher = Dispatcher::new(client).with_config(ExecutionConfig {
        continue_on_fail: req.continue_on_fail,
    });

    match dispatcher.execute(selector, &items).await {
        Ok(records) => Json(ApiResponse::<Vec<OutputRecord>>::success(records)).into_response(),
        Err(e) => error_response(&e),
    }
}
