//! Core domain types and port definitions for codexrpc.
//!
//! This crate knows nothing about HTTP, JSON-RPC envelopes or any particular
//! completion vendor. It defines the completion request/result model and the
//! [`CompletionPort`] trait that backend adapters implement.
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    CompletionChoice, CompletionParams, CompletionResult, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, Usage,
};
pub use ports::{CompletionError, CompletionPort};
