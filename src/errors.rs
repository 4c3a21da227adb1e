//! Protocol and transport error types
//!
//! `ProtocolError` is both the JSON-RPC error payload written on the wire and the
//! error value raised by tool and resource handlers, so a handler can return one
//! and have it reach the client with its code and data intact.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error type returned by tool and resource handlers.
///
/// A boxed [`ProtocolError`] is forwarded to the client unchanged; any other error
/// is reported as [`ErrorCode::InternalError`] carrying its display text.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// JSON-RPC 2.0 error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    /// Handler-defined code, forwarded as-is.
    Server(i32),
}

impl ErrorCode {
    pub const fn code(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
            Self::Server(code) => code,
        }
    }

    pub const fn from_code(code: i32) -> Self {
        match code {
            -32700 => Self::ParseError,
            -32600 => Self::InvalidRequest,
            -32601 => Self::MethodNotFound,
            -32602 => Self::InvalidParams,
            -32603 => Self::InternalError,
            other => Self::Server(other),
        }
    }

    pub const fn default_message(self) -> &'static str {
        match self {
            Self::ParseError => "Parse error",
            Self::InvalidRequest => "Invalid Request",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams => "Invalid params",
            Self::InternalError => "Internal error",
            Self::Server(_) => "Server error",
        }
    }
}

/// A JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ProtocolError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ProtocolError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn parse_error() -> Self {
        Self::new(ErrorCode::ParseError, "Invalid JSON")
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    pub fn method_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MethodNotFound, message)
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParams, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::from_code(self.code)
    }

    /// Recovers a `ProtocolError` raised by a handler, or wraps a foreign error as
    /// an internal error.
    pub fn from_handler_error(err: HandlerError) -> Self {
        match err.downcast::<ProtocolError>() {
            Ok(protocol) => *protocol,
            Err(other) => {
                let text = other.to_string();
                if text.is_empty() {
                    Self::internal(ErrorCode::InternalError.default_message())
                } else {
                    Self::internal(text)
                }
            }
        }
    }
}

/// Failures that end a single connection or line session.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("websocket failure: {0}")]
    WebSocket(#[from] axum::Error),
    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn codes_match_json_rpc_table() {
        assert_eq!(ErrorCode::ParseError.code(), -32700);
        assert_eq!(ErrorCode::InvalidRequest.code(), -32600);
        assert_eq!(ErrorCode::MethodNotFound.code(), -32601);
        assert_eq!(ErrorCode::InvalidParams.code(), -32602);
        assert_eq!(ErrorCode::InternalError.code(), -32603);
        assert_eq!(ErrorCode::from_code(-32001), ErrorCode::Server(-32001));
    }

    #[test]
    fn protocol_error_survives_boxing() {
        let original = ProtocolError::invalid_params("limit must be an integer")
            .with_data(json!({"limit": "ten"}));
        let boxed: HandlerError = original.clone().into();

        let recovered = ProtocolError::from_handler_error(boxed);
        assert_eq!(recovered, original);
    }

    #[test]
    fn foreign_error_becomes_internal() {
        let boxed: HandlerError = std::io::Error::other("database offline").into();

        let recovered = ProtocolError::from_handler_error(boxed);
        assert_eq!(recovered.error_code(), ErrorCode::InternalError);
        assert_eq!(recovered.message, "database offline");
        assert!(recovered.data.is_none());
    }

    #[test]
    fn silent_foreign_error_gets_default_message() {
        let boxed: HandlerError = std::io::Error::other("").into();

        let recovered = ProtocolError::from_handler_error(boxed);
        assert_eq!(recovered.error_code(), ErrorCode::InternalError);
        assert_eq!(recovered.message, "Internal error");
    }

    #[test]
    fn data_is_omitted_when_absent() {
        let encoded = serde_json::to_string(&ProtocolError::method_not_found("Tool not found: x"))
            .expect("error serialization");
        assert_eq!(encoded, r#"{"code":-32601,"message":"Tool not found: x"}"#);
    }
}
