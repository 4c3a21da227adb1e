//! The central Model Context Protocol engine
//!
//! Validates inbound envelopes, routes them by method, consults the registry for
//! `tools/call` and `resources/read`, and shapes every outcome into a response
//! envelope. Transports only move bytes in and out of [`McpServer::process_message`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::ProtocolError;
use crate::mcp::context::RequestContext;
use crate::mcp::pattern::is_valid_uri;
use crate::mcp::registry::{Registry, ResourceRegistrar, ToolRegistrar};
use crate::mcp::rpc::{validate_message, Message};
use crate::mcp::types::{
    CallToolParams, InitializeParams, InitializeResult, ListResourcesResult, ListToolsResult,
    ReadResourceParams, ReadResourceResult, Resource, ResourcesCapability, ServerCapabilities,
    ServerInfo, Tool, ToolsCapability,
};

pub const SUPPORTED_PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "BrewSource MCP Server";

/// The methods this server understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Initialize,
    ToolsList,
    ToolsCall,
    ResourcesList,
    ResourcesRead,
    /// `notifications/initialized`, sent by clients after the handshake.
    Initialized,
    Unknown(String),
}

impl Method {
    pub fn parse(name: &str) -> Self {
        match name {
            "initialize" => Self::Initialize,
            "tools/list" => Self::ToolsList,
            "tools/call" => Self::ToolsCall,
            "resources/list" => Self::ResourcesList,
            "resources/read" => Self::ResourcesRead,
            "notifications/initialized" => Self::Initialized,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Initialize => "initialize",
            Self::ToolsList => "tools/list",
            Self::ToolsCall => "tools/call",
            Self::ResourcesList => "resources/list",
            Self::ResourcesRead => "resources/read",
            Self::Initialized => "notifications/initialized",
            Self::Unknown(name) => name,
        }
    }
}

/// Protocol engine shared by every transport.
#[derive(Default)]
pub struct McpServer {
    registry: Registry,
    tools: Vec<Tool>,
    resources: Vec<Resource>,
}

impl McpServer {
    pub fn new(tools: &dyn ToolRegistrar, resources: &dyn ResourceRegistrar) -> Self {
        Self::default()
            .with_tool_registrar(tools)
            .with_resource_registrar(resources)
    }

    /// Lets `registrar` populate the registry and appends its descriptors to the
    /// `tools/list` enumeration.
    pub fn with_tool_registrar(mut self, registrar: &dyn ToolRegistrar) -> Self {
        registrar.register_tools(&self.registry);
        self.tools.extend(registrar.tool_definitions());
        self.warn_on_undescribed_tools();
        self
    }

    pub fn with_resource_registrar(mut self, registrar: &dyn ResourceRegistrar) -> Self {
        registrar.register_resources(&self.registry);
        self.resources.extend(registrar.resource_definitions());
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn tool_definitions(&self) -> &[Tool] {
        &self.tools
    }

    pub fn resource_definitions(&self) -> &[Resource] {
        &self.resources
    }

    /// Validates raw bytes and dispatches the envelope. Validation failures are
    /// answered with an identifier-less error response.
    pub async fn process_message(&self, ctx: &RequestContext, data: &[u8]) -> Option<Message> {
        match validate_message(data) {
            Ok(message) => self.dispatch(ctx, message).await,
            Err(err) => {
                debug!(
                    session = ctx.session_id(),
                    code = err.code,
                    error = %err,
                    "rejected inbound envelope"
                );
                Some(Message::error_response(None, err))
            }
        }
    }

    /// Routes a validated envelope. `None` means no response is due, which only
    /// happens for one-way notifications.
    pub async fn dispatch(&self, ctx: &RequestContext, message: Message) -> Option<Message> {
        let Message {
            id, method, params, ..
        } = message;
        let method = Method::parse(method.as_deref().unwrap_or_default());
        let audit_params = redact_audit_params(params.as_ref());

        let response = match &method {
            Method::Initialize => self.handle_initialize(id, params),
            Method::ToolsList => result_response(
                id,
                &ListToolsResult {
                    tools: &self.tools,
                },
            ),
            Method::ToolsCall => self.handle_tools_call(ctx, id, params).await,
            Method::ResourcesList => result_response(
                id,
                &ListResourcesResult {
                    resources: &self.resources,
                },
            ),
            Method::ResourcesRead => self.handle_resources_read(ctx, id, params).await,
            Method::Initialized if id.is_none() => {
                debug!(session = ctx.session_id(), "client finished initialization");
                return None;
            }
            Method::Initialized | Method::Unknown(_) => Message::error_response(
                id,
                ProtocolError::method_not_found(format!("Method not found: {}", method.as_str())),
            ),
        };

        info!(
            session = ctx.session_id(),
            transport = %ctx.transport(),
            method = %method.as_str(),
            params = %audit_params,
            outcome = if response.is_error() { "failure" } else { "success" },
            "mcp action audited"
        );

        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>, params: Option<Value>) -> Message {
        let request: InitializeParams =
            match decode_params(params, "Invalid initialize parameters") {
                Ok(request) => request,
                Err(err) => return Message::error_response(id, err),
            };

        info!(
            client = %request.client_name(),
            client_version = %request.client_version(),
            "initialize request from client"
        );

        result_response(
            id,
            &InitializeResult {
                protocol_version: SUPPORTED_PROTOCOL_VERSION,
                capabilities: ServerCapabilities {
                    tools: ToolsCapability::default(),
                    resources: ResourcesCapability::default(),
                },
                server_info: ServerInfo {
                    name: SERVER_NAME,
                    version: env!("CARGO_PKG_VERSION"),
                },
            },
        )
    }

    async fn handle_tools_call(
        &self,
        ctx: &RequestContext,
        id: Option<Value>,
        params: Option<Value>,
    ) -> Message {
        let request: CallToolParams = match decode_params(params, "Invalid tool call parameters") {
            Ok(request) => request,
            Err(err) => return Message::error_response(id, err),
        };

        if request.name.is_empty() {
            return Message::error_response(id, ProtocolError::invalid_params("Missing tool name"));
        }

        let Some(handler) = self.registry.tool(&request.name) else {
            return Message::error_response(
                id,
                ProtocolError::method_not_found(format!("Tool not found: {}", request.name)),
            );
        };

        match handler
            .call(ctx.clone(), request.arguments.unwrap_or_default())
            .await
        {
            Ok(result) => result_response(id, &result),
            Err(err) => {
                let err = ProtocolError::from_handler_error(err);
                warn!(tool = %request.name, code = err.code, error = %err, "tool handler failed");
                Message::error_response(id, err)
            }
        }
    }

    async fn handle_resources_read(
        &self,
        ctx: &RequestContext,
        id: Option<Value>,
        params: Option<Value>,
    ) -> Message {
        let request: ReadResourceParams =
            match decode_params(params, "Invalid resource read parameters") {
                Ok(request) => request,
                Err(err) => return Message::error_response(id, err),
            };

        if request.uri.is_empty() {
            return Message::error_response(
                id,
                ProtocolError::invalid_params("Missing resource URI"),
            );
        }

        if !is_valid_uri(&request.uri) {
            return Message::error_response(
                id,
                ProtocolError::invalid_params("Malformed resource URI"),
            );
        }

        let Some(handler) = self.registry.resolve_resource(&request.uri) else {
            return Message::error_response(
                id,
                ProtocolError::method_not_found(format!("Resource not found: {}", request.uri)),
            );
        };

        match handler.read(ctx.clone(), request.uri.clone()).await {
            Ok(content) => result_response(
                id,
                &ReadResourceResult {
                    contents: vec![content],
                },
            ),
            Err(err) => {
                let err = ProtocolError::from_handler_error(err);
                warn!(uri = %request.uri, code = err.code, error = %err, "resource handler failed");
                Message::error_response(id, err)
            }
        }
    }

    fn warn_on_undescribed_tools(&self) {
        for name in self.registry.tool_names() {
            if !self.tools.iter().any(|tool| tool.name == name) {
                warn!(tool = %name, "tool is registered but not advertised by tools/list");
            }
        }
    }
}

/// Decodes per-method params. Absent or `null` params fall back to defaults; any
/// other non-object value, or an object of the wrong shape, is `InvalidParams`.
fn decode_params<T>(params: Option<Value>, message: &str) -> Result<T, ProtocolError>
where
    T: DeserializeOwned + Default,
{
    match params {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value @ Value::Object(_)) => {
            serde_json::from_value(value).map_err(|_| ProtocolError::invalid_params(message))
        }
        Some(_) => Err(ProtocolError::invalid_params(message)),
    }
}

fn result_response<T: Serialize>(id: Option<Value>, result: &T) -> Message {
    match serde_json::to_value(result) {
        Ok(value) => Message::response(id, value),
        Err(err) => Message::error_response(
            id,
            ProtocolError::internal(format!("failed to encode result: {err}")),
        ),
    }
}

pub fn redact_audit_params(params: Option<&Value>) -> Value {
    params.map(redact_value).unwrap_or(Value::Null)
}

fn redact_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| {
                    let item = if is_sensitive_key(key) {
                        Value::String("[REDACTED]".to_string())
                    } else {
                        redact_value(item)
                    };
                    (key.clone(), item)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_value).collect()),
        other => other.clone(),
    }
}

fn is_sensitive_key(key: &str) -> bool {
    const MARKERS: [&str; 6] = [
        "token",
        "secret",
        "password",
        "credential",
        "authorization",
        "api_key",
    ];
    let normalized = key.trim().to_ascii_lowercase();
    MARKERS.iter().any(|marker| normalized.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorCode, HandlerError};
    use crate::mcp::context::TransportKind;
    use crate::mcp::types::{ResourceContent, ToolResult};
    use serde_json::{json, Map};

    async fn brew(_ctx: RequestContext, arguments: Map<String, Value>) -> Result<ToolResult, HandlerError> {
        let style = arguments
            .get("style")
            .and_then(Value::as_str)
            .unwrap_or("lager");
        Ok(ToolResult::text(format!("brewing {style}")))
    }

    async fn styles(_ctx: RequestContext, uri: String) -> Result<ResourceContent, HandlerError> {
        Ok(ResourceContent::json(uri, &json!({"styles": []})))
    }

    fn server() -> McpServer {
        let server = McpServer::default();
        server.registry().register_tool("brew", brew);
        server.registry().register_resource("bjcp://*", styles);
        server
    }

    async fn call(server: &McpServer, request: Value) -> Option<Message> {
        let ctx = RequestContext::detached(TransportKind::Stdio);
        let bytes = serde_json::to_vec(&request).expect("encode request");
        server.process_message(&ctx, &bytes).await
    }

    fn error_code(message: &Message) -> ErrorCode {
        message
            .error
            .as_ref()
            .expect("error response")
            .error_code()
    }

    #[test]
    fn method_names_round_trip() {
        for name in [
            "initialize",
            "tools/list",
            "tools/call",
            "resources/list",
            "resources/read",
            "notifications/initialized",
            "ping",
        ] {
            assert_eq!(Method::parse(name).as_str(), name);
        }
        assert_eq!(Method::parse("ping"), Method::Unknown("ping".to_string()));
    }

    #[tokio::test]
    async fn initialize_reports_server_metadata() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize",
                   "params": {"clientInfo": {"name": "cli", "version": "0.1"}}}),
        )
        .await
        .expect("response");

        let result = response.result.expect("result");
        assert_eq!(result["protocolVersion"], SUPPORTED_PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
        assert_eq!(result["capabilities"]["resources"]["subscribe"], false);
    }

    #[tokio::test]
    async fn initialize_without_params_uses_defaults() {
        let response = call(&server(), json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"}))
            .await
            .expect("response");
        assert!(response.result.is_some());
    }

    #[tokio::test]
    async fn initialize_rejects_non_object_params() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": [1, 2]}),
        )
        .await
        .expect("response");
        assert_eq!(error_code(&response), ErrorCode::InvalidParams);
        assert_eq!(response.id, Some(json!(1)));
    }

    #[tokio::test]
    async fn tools_call_forwards_arguments() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": "a", "method": "tools/call",
                   "params": {"name": "brew", "arguments": {"style": "stout"}}}),
        )
        .await
        .expect("response");

        assert_eq!(response.id, Some(json!("a")));
        assert_eq!(
            response.result.expect("result")["content"][0]["text"],
            "brewing stout"
        );
    }

    #[tokio::test]
    async fn tools_call_with_null_arguments_passes_empty_map() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call",
                   "params": {"name": "brew", "arguments": null}}),
        )
        .await
        .expect("response");
        assert_eq!(
            response.result.expect("result")["content"][0]["text"],
            "brewing lager"
        );
    }

    #[tokio::test]
    async fn tools_call_with_wrongly_typed_name_is_invalid_params() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {"name": 5}}),
        )
        .await
        .expect("response");
        assert_eq!(error_code(&response), ErrorCode::InvalidParams);
    }

    #[tokio::test]
    async fn resources_read_rejects_relative_paths() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 4, "method": "resources/read",
                   "params": {"uri": "/version"}}),
        )
        .await
        .expect("response");
        let error = response.error.expect("error");
        assert_eq!(error.error_code(), ErrorCode::InvalidParams);
        assert_eq!(error.message, "Malformed resource URI");
    }

    #[tokio::test]
    async fn initialized_notification_gets_no_response() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        )
        .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn initialized_with_id_is_not_a_notification() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 9, "method": "notifications/initialized"}),
        )
        .await
        .expect("response");
        assert_eq!(error_code(&response), ErrorCode::MethodNotFound);
    }

    #[tokio::test]
    async fn invalid_bytes_produce_identifier_less_error() {
        let ctx = RequestContext::detached(TransportKind::Stdio);
        let response = server()
            .process_message(&ctx, b"{\"jsonrpc\":\"2.0\",\"id\":")
            .await
            .expect("response");
        assert_eq!(error_code(&response), ErrorCode::ParseError);
        assert!(response.id.is_none());
    }

    #[test]
    fn redacts_sensitive_fields_in_audit_params() {
        let params = json!({
            "name": "search_beers",
            "arguments": {
                "brewery": "Russian River",
                "api_key": "hidden",
                "nested": [{"AccessToken": "hidden"}]
            }
        });

        let redacted = redact_audit_params(Some(&params));
        assert_eq!(redacted["name"], "search_beers");
        assert_eq!(redacted["arguments"]["brewery"], "Russian River");
        assert_eq!(redacted["arguments"]["api_key"], "[REDACTED]");
        assert_eq!(redacted["arguments"]["nested"][0]["AccessToken"], "[REDACTED]");
        assert_eq!(redact_audit_params(None), Value::Null);
    }
}
