//! Wire types for the OpenAI Completions endpoint.
//!
//! These mirror the vendor JSON and stay private to this crate; `port.rs`
//! converts them to and from core domain types.

use codexrpc_core::CompletionParams;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys the gateway controls itself and never forwards from caller params.
const RESERVED_KEYS: &[&str] = &["stream"];

/// Body of `POST /completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiCompletionRequest {
    pub model: Value,
    pub prompt: Value,
    pub max_tokens: Value,
    pub temperature: Value,
    /// Responses are always read whole.
    pub stream: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiCompletionRequest {
    pub fn from_params(params: &CompletionParams) -> Self {
        let extra = params
            .extra
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            model: params.model.clone(),
            prompt: params.prompt.clone(),
            max_tokens: params.max_tokens.clone(),
            temperature: params.temperature.clone(),
            stream: false,
            extra,
        }
    }
}

/// Successful response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCompletionResponse {
    pub id: String,
    #[serde(default = "default_object")]
    pub object: String,
    pub created: i64,
    pub model: String,
    #[serde(default)]
    pub choices: Vec<ApiChoice>,
    #[serde(default)]
    pub usage: Option<ApiUsage>,
}

fn default_object() -> String {
    "text_completion".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiChoice {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ApiUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Error body: `{"error": {"message": ..., "type": ..., "code": ...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub code: Option<Value>,
}
