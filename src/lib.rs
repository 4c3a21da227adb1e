use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tokio_util::sync::CancellationToken;

pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod mcp;
pub mod transport;

use domain::catalog::CatalogProvider;
use domain::resources::CatalogResources;
use domain::tools::CatalogTools;
use mcp::server::McpServer;

#[derive(Clone)]
pub struct AppState {
    pub server: Arc<McpServer>,
    /// Parent of every connection's cancellation token.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(server: Arc<McpServer>, shutdown: CancellationToken) -> Self {
        Self { server, shutdown }
    }
}

/// Builds the protocol engine with the catalog tools and resources registered.
pub fn build_server(catalog: Arc<dyn CatalogProvider>) -> McpServer {
    McpServer::new(
        &CatalogTools::new(catalog.clone()),
        &CatalogResources::new(catalog),
    )
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route(
            http::handlers::MCP_ENDPOINT,
            get(http::handlers::mcp_websocket).post(http::handlers::mcp_endpoint),
        )
        .route("/health", get(http::handlers::health))
        .route("/.well-known/mcp", get(http::handlers::discovery))
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::catalog::InMemoryCatalog;

    fn app() -> Router {
        let server = build_server(Arc::new(InMemoryCatalog::seeded()));
        build_app(AppState::new(Arc::new(server), CancellationToken::new()))
    }

    async fn post_mcp(body: &'static str) -> Response {
        app()
            .oneshot(
                Request::builder()
                    .uri("/mcp")
                    .method("POST")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .expect("request build"),
            )
            .await
            .expect("request execution")
    }

    async fn body_json(response: Response) -> Value {
        let body = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        serde_json::from_slice(&body).expect("valid json response")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .method("GET")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::OK);
        let body = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        assert_eq!(body, "{\"status\":\"ok\"}");
    }

    #[tokio::test]
    async fn discovery_points_at_mcp_endpoint() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/.well-known/mcp")
                    .method("GET")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["mcp_endpoint"], "/mcp");
    }

    #[tokio::test]
    async fn mcp_get_without_upgrade_is_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/mcp")
                    .method("GET")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn mcp_unknown_method_returns_method_not_found() {
        let response = post_mcp(r#"{"jsonrpc":"2.0","id":1,"method":"unknown"}"#).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        assert_eq!(
            body,
            "{\"jsonrpc\":\"2.0\",\"id\":1,\"error\":{\"code\":-32601,\"message\":\"Method not found: unknown\"}}"
        );
    }

    #[tokio::test]
    async fn mcp_initialize_returns_result() {
        let response = post_mcp(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","clientInfo":{"name":"test-client","version":"1.0.0"},"capabilities":{}}}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["id"], 1);
        assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(body["result"]["serverInfo"]["name"], "BrewSource MCP Server");
        assert_eq!(
            body["result"]["serverInfo"]["version"],
            env!("CARGO_PKG_VERSION")
        );
        assert!(body["result"]["capabilities"]["tools"].is_object());
        assert!(body["result"]["capabilities"]["resources"].is_object());
        assert!(body["result"]["capabilities"]["prompts"].is_null());
    }

    #[tokio::test]
    async fn mcp_tools_list_advertises_catalog_tools() {
        let response = post_mcp(r#"{"version":"2.0","method":"tools/list"}"#).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body.get("id").is_none());

        let names: Vec<&str> = body["result"]["tools"]
            .as_array()
            .expect("tools array")
            .iter()
            .filter_map(|tool| tool["name"].as_str())
            .collect();
        assert_eq!(names, ["bjcp_lookup", "search_beers", "find_breweries"]);
    }

    #[tokio::test]
    async fn mcp_notification_returns_no_content() {
        let response =
            post_mcp(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn mcp_invalid_json_returns_parse_error() {
        let response = post_mcp("{").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], -32700);
        assert!(body.get("id").is_none());
    }

    #[tokio::test]
    async fn mcp_batch_is_rejected() {
        let response = post_mcp(r#"[{"jsonrpc":"2.0","id":1,"method":"tools/list"}]"#).await;
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], -32700);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/services")
                    .method("GET")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
