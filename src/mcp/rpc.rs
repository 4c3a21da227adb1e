//! JSON-RPC envelope representation and validation
//!
//! A single [`Message`] type carries requests, notifications and responses. Inbound
//! bytes go through [`validate_message`] before the dispatcher sees them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::ProtocolError;

pub const JSONRPC_VERSION: &str = "2.0";

const VERSION_KEY: &str = "jsonrpc";
/// Accepted on input in place of `jsonrpc`, never written.
const VERSION_ALIAS: &str = "version";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub jsonrpc: String,
    /// Echoed verbatim from request to response. Absent for notifications; an
    /// explicit `null` stays `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "present_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ProtocolError>,
}

impl Message {
    pub fn request(id: Value, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            method: Some(method.into()),
            params,
            result: None,
            error: None,
        }
    }

    pub fn notification(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: None,
            method: Some(method.into()),
            params,
            result: None,
            error: None,
        }
    }

    pub fn response(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: None,
            params: None,
            result: Some(result),
            error: None,
        }
    }

    pub fn error_response(id: Option<Value>, error: ProtocolError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: None,
            params: None,
            result: None,
            error: Some(error),
        }
    }

    pub fn method_name(&self) -> &str {
        self.method.as_deref().unwrap_or_default()
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none() && self.method.is_some()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Parses raw bytes into an envelope, enforcing the protocol version tag.
///
/// Empty input, `null`, malformed JSON and non-object documents are parse errors.
/// A decoded object with a missing or unsupported version tag, a structured
/// identifier, or fields of the wrong type is an invalid request.
pub fn validate_message(data: &[u8]) -> Result<Message, ProtocolError> {
    let value: Value = serde_json::from_slice(data).map_err(|_| ProtocolError::parse_error())?;
    let Value::Object(mut object) = value else {
        return Err(ProtocolError::parse_error());
    };

    let version = object
        .get(VERSION_KEY)
        .or_else(|| object.get(VERSION_ALIAS))
        .and_then(Value::as_str);
    if version != Some(JSONRPC_VERSION) {
        return Err(ProtocolError::invalid_request("Invalid JSON-RPC version"));
    }

    if matches!(object.get("id"), Some(Value::Array(_) | Value::Object(_))) {
        return Err(ProtocolError::invalid_request(
            "Request id must be a string or number",
        ));
    }

    object.remove(VERSION_ALIAS);
    object.insert(VERSION_KEY.to_string(), Value::from(JSONRPC_VERSION));

    serde_json::from_value(Value::Object(object))
        .map_err(|err| ProtocolError::invalid_request(format!("Malformed envelope: {err}")))
}
