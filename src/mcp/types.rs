//! MCP payload types
//!
//! Descriptors, handler results and per-method parameter shapes. Tool input
//! schemas are opaque JSON forwarded to clients without validation.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl Tool {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub uri: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mime_type: String,
}

impl Resource {
    pub fn json(uri: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            description: description.into(),
            mime_type: "application/json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// A tool-level failure reported inside a successful response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    pub uri: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob: Option<String>,
}

impl ResourceContent {
    pub fn json(uri: impl Into<String>, body: &Value) -> Self {
        Self {
            uri: uri.into(),
            mime_type: "application/json".to_string(),
            text: Some(body.to_string()),
            blob: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadResourceResult {
    pub contents: Vec<ResourceContent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListToolsResult<'a> {
    pub tools: &'a [Tool],
}

#[derive(Debug, Clone, Serialize)]
pub struct ListResourcesResult<'a> {
    pub resources: &'a [Resource],
}

/// `initialize` parameters. Sub-fields are kept loose so that a malformed
/// `clientInfo` or `capabilities` never fails the handshake.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    #[serde(default)]
    pub protocol_version: Option<Value>,
    #[serde(default)]
    pub capabilities: Option<Value>,
    #[serde(default)]
    pub client_info: Option<Value>,
}

impl InitializeParams {
    pub fn client_name(&self) -> &str {
        self.client_field("name")
    }

    pub fn client_version(&self) -> &str {
        self.client_field("version")
    }

    fn client_field(&self, key: &str) -> &str {
        self.client_info
            .as_ref()
            .and_then(|info| info.get(key))
            .and_then(Value::as_str)
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: &'static str,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerCapabilities {
    pub tools: ToolsCapability,
    pub resources: ResourcesCapability,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    pub list_changed: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesCapability {
    pub subscribe: bool,
    pub list_changed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct CallToolParams {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReadResourceParams {
    #[serde(default)]
    pub uri: String,
}

pub fn string_schema(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description,
    })
}

pub fn integer_schema(description: &str) -> Value {
    json!({
        "type": "integer",
        "description": description,
    })
}

pub fn object_schema(properties: Vec<(&str, Value)>, required: &[&str]) -> Value {
    let properties: Map<String, Value> = properties
        .into_iter()
        .map(|(key, schema)| (key.to_string(), schema))
        .collect();

    let mut schema = json!({
        "type": "object",
        "properties": properties,
    });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_result_omits_is_error_on_success() {
        let encoded = serde_json::to_value(ToolResult::text("ok")).expect("serialize");
        assert_eq!(encoded, json!({"content": [{"type": "text", "text": "ok"}]}));

        let encoded = serde_json::to_value(ToolResult::error("bad")).expect("serialize");
        assert_eq!(encoded["isError"], true);
    }

    #[test]
    fn initialize_params_tolerate_malformed_client_info() {
        let params: InitializeParams =
            serde_json::from_value(json!({"clientInfo": 42, "capabilities": "none"}))
                .expect("loose decode");
        assert_eq!(params.client_name(), "unknown");
        assert_eq!(params.client_version(), "unknown");

        let params: InitializeParams =
            serde_json::from_value(json!({"clientInfo": {"name": "inspector", "version": "1.2"}}))
                .expect("decode");
        assert_eq!(params.client_name(), "inspector");
        assert_eq!(params.client_version(), "1.2");
    }

    #[test]
    fn object_schema_lists_required_only_when_present() {
        let schema = object_schema(vec![("uri", string_schema("target"))], &[]);
        assert!(schema.get("required").is_none());
        assert_eq!(schema["properties"]["uri"]["type"], "string");

        let schema = object_schema(vec![("uri", string_schema("target"))], &["uri"]);
        assert_eq!(schema["required"], json!(["uri"]));
    }

    #[test]
    fn resource_content_serializes_camel_case() {
        let content = ResourceContent::json("bjcp://styles", &json!({"count": 1}));
        let encoded = serde_json::to_value(content).expect("serialize");
        assert_eq!(encoded["mimeType"], "application/json");
        assert_eq!(encoded["text"], "{\"count\":1}");
        assert!(encoded.get("blob").is_none());
    }
}
