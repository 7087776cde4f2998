//! Completion backend port.
//!
//! The RPC layer talks to whatever produces completions through this trait.
//! The production adapter lives in `codexrpc-openai`; tests inject stubs.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::domain::{CompletionParams, CompletionResult};

/// Errors surfaced by a completion backend.
///
/// `Display` renders only the backend-provided detail, so callers can
/// forward it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// The backend answered with an error status.
    #[error("{message}")]
    Api {
        /// HTTP status returned by the backend.
        status: u16,
        /// Backend-provided message.
        message: String,
    },

    /// The request did not complete in time.
    #[error("{0}")]
    Timeout(String),

    /// Connection-level failure before a response was received.
    #[error("{0}")]
    Network(String),

    /// The backend answered 2xx with a body we could not decode.
    #[error("{0}")]
    InvalidResponse(String),

    /// The request could not be turned into a backend call at all.
    #[error("{0}")]
    InvalidRequest(String),
}

impl CompletionError {
    /// Stable discriminant for structured logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Api { .. } => "api",
            Self::Timeout(_) => "timeout",
            Self::Network(_) => "network",
            Self::InvalidResponse(_) => "invalid_response",
            Self::InvalidRequest(_) => "invalid_request",
        }
    }

    /// HTTP status reported by the backend, if it answered at all.
    #[must_use]
    pub const fn backend_status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Port for producing text completions.
///
/// Implementations are shared across concurrent requests and must not
/// carry per-request mutable state.
#[async_trait]
pub trait CompletionPort: Send + Sync + fmt::Debug {
    /// Run one completion. Implementations make a single attempt.
    async fn complete(&self, params: &CompletionParams) -> Result<CompletionResult, CompletionError>;
}
