//! RPC error taxonomy and its HTTP mapping.
//!
//! Every failure a request can hit is one variant here. Each variant owns
//! its HTTP status and its body shape: envelope-level failures answer with a
//! plain `{"detail": ...}` body because no id is available, everything after
//! envelope validation answers with a JSON-RPC error object echoing the id.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use thiserror::Error;

use crate::models::{DetailBody, RpcErrorResponse, codes};

/// A request-terminating failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RpcError {
    /// Body is not valid JSON.
    #[error("Invalid JSON payload")]
    MalformedBody,

    /// JSON parsed but is not a valid JSON-RPC 2.0 request.
    #[error("Invalid JSON-RPC request")]
    InvalidEnvelope,

    /// Envelope is valid but the method is not served.
    #[error("Method '{method}' not found")]
    UnknownMethod { id: Value, method: String },

    /// The completion call failed. The message is passed through as is.
    #[error("{message}")]
    BackendFailure { id: Value, message: String },
}

impl RpcError {
    /// HTTP status for this failure.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MalformedBody | Self::InvalidEnvelope => StatusCode::BAD_REQUEST,
            Self::UnknownMethod { .. } => StatusCode::NOT_FOUND,
            Self::BackendFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON-RPC error code, for variants answered with a JSON-RPC envelope.
    #[must_use]
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::MalformedBody | Self::InvalidEnvelope => None,
            Self::UnknownMethod { .. } => Some(codes::METHOD_NOT_FOUND),
            Self::BackendFailure { .. } => Some(codes::SERVER_ERROR),
        }
    }

    /// Request id to echo, if one was extracted.
    #[must_use]
    pub const fn id(&self) -> Option<&Value> {
        match self {
            Self::MalformedBody | Self::InvalidEnvelope => None,
            Self::UnknownMethod { id, .. } | Self::BackendFailure { id, .. } => Some(id),
        }
    }

    /// Response body for this failure.
    #[must_use]
    pub fn to_body(&self) -> Value {
        let body = match (self.id(), self.code()) {
            (Some(id), Some(code)) => {
                serde_json::to_value(RpcErrorResponse::new(id.clone(), code, self.to_string()))
            }
            _ => serde_json::to_value(DetailBody::new(self.to_string())),
        };
        // Both shapes are plain structs of strings, numbers and JSON values.
        body.unwrap_or(Value::Null)
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_malformed_body_mapping() {
        let err = RpcError::MalformedBody;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_body(), json!({"detail": "Invalid JSON payload"}));
    }

    #[test]
    fn test_invalid_envelope_mapping() {
        let err = RpcError::InvalidEnvelope;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_body(), json!({"detail": "Invalid JSON-RPC request"}));
    }

    #[test]
    fn test_unknown_method_mapping() {
        let err = RpcError::UnknownMethod {
            id: json!(1),
            method: "foo".to_string(),
        };
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.to_body(),
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": -32601, "message": "Method 'foo' not found"}
            })
        );
    }

    #[test]
    fn test_backend_failure_mapping() {
        let err = RpcError::BackendFailure {
            id: json!("req-7"),
            message: "rate limit exceeded".to_string(),
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_body()["error"]["code"], -32000);
        assert_eq!(err.to_body()["error"]["message"], "rate limit exceeded");
        assert_eq!(err.to_body()["id"], "req-7");
    }

    #[test]
    fn test_into_response_status() {
        let response = RpcError::InvalidEnvelope.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
