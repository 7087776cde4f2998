//! CLI error types and exit codes.

use codexrpc_openai::OpenAiError;
use thiserror::Error;

use crate::credentials::CredentialError;

/// Errors that abort startup or stop the server.
#[derive(Debug, Error)]
pub enum CliError {
    /// No usable API key.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend client could not be constructed.
    #[error("Failed to initialise the completion client: {0}")]
    Client(#[from] OpenAiError),

    /// The server failed to bind or stopped with an error.
    #[error("Server error: {0:#}")]
    Server(#[from] anyhow::Error),
}

impl CliError {
    /// Map the error to a process exit code (see sysexits.h).
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Credential(CredentialError::Unreadable { .. }) => 74, // EX_IOERR
            Self::Credential(_) | Self::Config(_) | Self::Client(_) => 78, // EX_CONFIG
            Self::Server(_) => 1,
        }
    }
}
