//! Launcher for the codexrpc JSON-RPC gateway.
//!
//! Parses arguments, discovers the API key, and composes the OpenAI
//! client, translator and server configuration. `main.rs` only drives the
//! runtime and signal handling.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary target only.
use dotenvy as _;
use tokio as _;
use tokio_util as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod credentials;
pub mod error;
pub mod parser;

pub use bootstrap::{GatewayConfig, bootstrap};
pub use credentials::{CredentialError, CredentialSource, default_key_file, resolve_api_key};
pub use error::CliError;
pub use parser::Cli;
