//! OpenAI Completions API backend for codexrpc.
//!
//! Implements [`codexrpc_core::CompletionPort`] on top of the legacy
//! `POST /v1/completions` endpoint. Each call is a single attempt; failures
//! are mapped to [`codexrpc_core::CompletionError`] with the vendor's
//! message preserved.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// Allow private types in public type alias - DefaultOpenAiClient is meant to be used
// through the CompletionPort trait, not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultOpenAiClient;

// Configuration
pub use config::{ApiKey, DEFAULT_BASE_URL, OpenAiClientConfig};

// Errors surfaced while constructing the client
pub use error::OpenAiError;
