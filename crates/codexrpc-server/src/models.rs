//! JSON-RPC 2.0 envelope types.
//!
//! Requests are validated by hand from a `serde_json::Value` rather than
//! derived, because each shape violation maps to a specific HTTP answer and
//! the `id` must be echoed back exactly as received.

use serde::Serialize;
use serde_json::Value;

use crate::error::RpcError;

/// Protocol version string carried by every request and response.
pub const JSONRPC_VERSION: &str = "2.0";

/// The only method this gateway serves.
pub const METHOD_COMPLETE: &str = "complete";

/// JSON-RPC error codes used by the gateway.
pub mod codes {
    /// The method does not exist.
    pub const METHOD_NOT_FOUND: i64 = -32601;
    /// Backend (server) error.
    pub const SERVER_ERROR: i64 = -32000;
}

// =============================================================================
// Request
// =============================================================================

/// A validated JSON-RPC request.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcRequest {
    /// Non-empty method name.
    pub method: String,
    /// Non-null request id, echoed verbatim.
    pub id: Value,
    /// Raw `params` member, if present.
    pub params: Option<Value>,
}

impl RpcRequest {
    /// Parse and validate a raw request body.
    ///
    /// # Errors
    ///
    /// - [`RpcError::MalformedBody`] if the bytes are not JSON.
    /// - [`RpcError::InvalidEnvelope`] if the JSON is not an object, the
    ///   version is not `"2.0"`, the method is missing, empty or not a
    ///   string, or the id is missing or `null`.
    pub fn parse(body: &[u8]) -> Result<Self, RpcError> {
        let payload: Value = serde_json::from_slice(body).map_err(|_| RpcError::MalformedBody)?;

        let Value::Object(mut object) = payload else {
            return Err(RpcError::InvalidEnvelope);
        };

        if object.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Err(RpcError::InvalidEnvelope);
        }

        let method = match object.get("method").and_then(Value::as_str) {
            Some(method) if !method.is_empty() => method.to_string(),
            _ => return Err(RpcError::InvalidEnvelope),
        };

        let id = match object.remove("id") {
            Some(id) if !id.is_null() => id,
            _ => return Err(RpcError::InvalidEnvelope),
        };

        Ok(Self {
            method,
            id,
            params: object.remove("params"),
        })
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Successful JSON-RPC response.
#[derive(Debug, Clone, Serialize)]
pub struct RpcResponse<T> {
    pub jsonrpc: &'static str,
    pub id: Value,
    pub result: T,
}

impl<T> RpcResponse<T> {
    pub const fn new(id: Value, result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
        }
    }
}

/// JSON-RPC error response.
#[derive(Debug, Clone, Serialize)]
pub struct RpcErrorResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    pub error: RpcErrorObject,
}

/// The `error` member of a JSON-RPC error response.
#[derive(Debug, Clone, Serialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

impl RpcErrorResponse {
    pub fn new(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            error: RpcErrorObject {
                code,
                message: message.into(),
            },
        }
    }
}

/// Plain `{"detail": ...}` body for failures where no id can be echoed.
#[derive(Debug, Clone, Serialize)]
pub struct DetailBody {
    pub detail: String,
}

impl DetailBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
