//! Internal error types for OpenAI operations.
//!
//! These errors are internal to `codexrpc-openai` and are mapped to
//! [`codexrpc_core::CompletionError`] at the port boundary.

use thiserror::Error;

/// Result type alias for OpenAI operations.
pub type OpenAiResult<T> = Result<T, OpenAiError>;

/// Errors related to OpenAI API operations.
#[derive(Debug, Error)]
pub enum OpenAiError {
    /// The API answered with a non-success status.
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message extracted from the error body
        message: String,
    },

    /// Network or HTTP client error.
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// Configured base URL could not be parsed.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A 2xx body did not match the completion schema.
    #[error("Invalid response from completion API: {0}")]
    JsonParse(#[from] serde_json::Error),
}
