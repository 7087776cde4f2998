//! Port trait implementation for `OpenAiClient`.
//!
//! Implements the core-owned `CompletionPort` trait, converting between
//! OpenAI wire types and core domain types.

use async_trait::async_trait;
use codexrpc_core::{
    CompletionChoice, CompletionError, CompletionParams, CompletionPort, CompletionResult, Usage,
};
use tracing::warn;

use crate::client::OpenAiClient;
use crate::error::OpenAiError;
use crate::http::HttpBackend;
use crate::models::{ApiCompletionRequest, ApiCompletionResponse};

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `OpenAiError` to core `CompletionError`.
fn map_error(err: OpenAiError) -> CompletionError {
    match err {
        OpenAiError::Api { status, message } => CompletionError::Api { status, message },
        OpenAiError::Network(e) if e.is_timeout() => CompletionError::Timeout(e.to_string()),
        OpenAiError::Network(e) if e.is_decode() => {
            CompletionError::InvalidResponse(e.to_string())
        }
        OpenAiError::Network(e) => CompletionError::Network(e.to_string()),
        OpenAiError::InvalidUrl(e) => CompletionError::Network(e.to_string()),
        err @ OpenAiError::JsonParse(_) => CompletionError::InvalidResponse(err.to_string()),
    }
}

// ============================================================================
// Type Conversions
// ============================================================================

fn to_result(response: ApiCompletionResponse) -> CompletionResult {
    CompletionResult {
        id: response.id,
        object: response.object,
        created: response.created,
        model: response.model,
        choices: response
            .choices
            .into_iter()
            .map(|choice| CompletionChoice {
                text: choice.text,
                index: choice.index,
                finish_reason: choice.finish_reason,
            })
            .collect(),
        usage: response.usage.map(|usage| Usage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }),
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend> CompletionPort for OpenAiClient<B> {
    async fn complete(
        &self,
        params: &CompletionParams,
    ) -> Result<CompletionResult, CompletionError> {
        let request = ApiCompletionRequest::from_params(params);
        match self.create_completion(&request).await {
            Ok(response) => Ok(to_result(response)),
            Err(err) => {
                let err = map_error(err);
                warn!(
                    kind = err.kind(),
                    status = ?err.backend_status(),
                    model = %params.model,
                    "Completion request failed: {err}"
                );
                Err(err)
            }
        }
    }
}
