//! Axum handlers for the web server
//!
//! `/mcp` accepts either a WebSocket upgrade (GET) or a single envelope per
//! request body (POST). Health and discovery are plain JSON endpoints.

use axum::{
    body::Bytes,
    extract::{ws::WebSocketUpgrade, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::mcp::context::{RequestContext, TransportKind};
use crate::transport::serve_connection;
use crate::AppState;

pub const MCP_ENDPOINT: &str = "/mcp";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub mcp_endpoint: &'static str,
    pub transports: [&'static str; 2],
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn discovery() -> Json<DiscoveryResponse> {
    Json(DiscoveryResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        mcp_endpoint: MCP_ENDPOINT,
        transports: ["websocket", "http"],
    })
}

pub async fn mcp_websocket(State(state): State<AppState>, upgrade: WebSocketUpgrade) -> Response {
    upgrade.on_upgrade(move |socket| serve_connection(state.server, socket, state.shutdown))
}

pub async fn mcp_endpoint(State(state): State<AppState>, body: Bytes) -> Response {
    let ctx = RequestContext::new(TransportKind::Http, state.shutdown.child_token());

    match state.server.process_message(&ctx, &body).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
