//! JSON-RPC to completion-backend translation.
//!
//! The [`Translator`] is stateless across requests: it holds a shared,
//! read-only backend handle and immutable configuration, so one instance
//! serves any number of concurrent requests without locking.

use std::sync::Arc;

use codexrpc_core::{CompletionParams, CompletionPort, CompletionResult, DEFAULT_MODEL};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::RpcError;
use crate::models::{METHOD_COMPLETE, RpcRequest, RpcResponse};

/// Immutable translator settings, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Model used when a `complete` call does not name one.
    pub default_model: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Maps raw JSON-RPC bodies to backend calls and back.
#[derive(Debug, Clone)]
pub struct Translator {
    backend: Arc<dyn CompletionPort>,
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(backend: Arc<dyn CompletionPort>, config: TranslatorConfig) -> Self {
        Self { backend, config }
    }

    pub const fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate one raw request body.
    ///
    /// At most one backend call is made, and only for a valid `complete`
    /// request whose `params` is an object or absent. Parameter values are
    /// not checked here; the backend rejects bad ones.
    pub async fn translate(
        &self,
        body: &[u8],
    ) -> Result<RpcResponse<CompletionResult>, RpcError> {
        let request = RpcRequest::parse(body)?;
        debug!(id = %request.id, method = %request.method, "JSON-RPC request");

        match request.method.as_str() {
            METHOD_COMPLETE => self.complete(request.id, request.params).await,
            _ => Err(RpcError::UnknownMethod {
                id: request.id,
                method: request.method,
            }),
        }
    }

    async fn complete(
        &self,
        id: Value,
        params: Option<Value>,
    ) -> Result<RpcResponse<CompletionResult>, RpcError> {
        let outcome = match CompletionParams::from_value(params, &self.config.default_model) {
            Ok(params) => {
                debug!(
                    id = %id,
                    model = %params.model,
                    max_tokens = %params.max_tokens,
                    temperature = %params.temperature,
                    "Dispatching completion"
                );
                self.backend.complete(&params).await
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => Ok(RpcResponse::new(id, result)),
            Err(e) => {
                warn!(id = %id, kind = e.kind(), "Completion failed: {e}");
                Err(RpcError::BackendFailure {
                    id,
                    message: e.to_string(),
                })
            }
        }
    }
}
