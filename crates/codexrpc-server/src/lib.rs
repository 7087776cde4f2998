//! JSON-RPC 2.0 over HTTP front end for a text-completion backend.
//!
//! A single route, `POST /`, accepts a JSON-RPC request, dispatches the
//! `complete` method to an injected [`codexrpc_core::CompletionPort`] and
//! maps the outcome back to a JSON-RPC response plus an HTTP status.
#![deny(unsafe_code)]

pub mod error;
pub mod models;
pub mod server;
pub mod translator;

pub use error::RpcError;
pub use server::{ServerConfig, create_router, serve, start};
pub use translator::{Translator, TranslatorConfig};
