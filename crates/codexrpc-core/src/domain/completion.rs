//! Completion request parameters and normalized completion results.
//!
//! `CompletionParams` is the `params` object of a `complete` call with the
//! documented defaults filled in. Values are kept as raw JSON: whatever the
//! caller sent for a key is what the backend receives, and the backend owns
//! validation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ports::CompletionError;

/// Model used when the caller does not name one.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";

/// Token limit used when the caller does not set `max_tokens`.
pub const DEFAULT_MAX_TOKENS: i64 = 150;

/// Sampling temperature used when the caller does not set `temperature`.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Parameters for a single completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionParams {
    /// Model identifier.
    pub model: Value,
    /// Prompt: a string, or anything else the backend accepts.
    pub prompt: Value,
    /// Maximum tokens to generate.
    pub max_tokens: Value,
    /// Sampling temperature.
    pub temperature: Value,
    /// Any other keys the caller supplied (`stop`, `top_p`, `suffix`, ...).
    pub extra: Map<String, Value>,
}

impl CompletionParams {
    /// Parameters with every field at its default.
    #[must_use]
    pub fn with_defaults(default_model: &str) -> Self {
        Self {
            model: Value::from(default_model),
            prompt: Value::from(""),
            max_tokens: Value::from(DEFAULT_MAX_TOKENS),
            temperature: Value::from(DEFAULT_TEMPERATURE),
            extra: Map::new(),
        }
    }

    /// Build parameters from the JSON-RPC `params` member.
    ///
    /// An absent or `null` member yields all defaults, as does a known key
    /// set to `null`. Present values are taken as is.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::InvalidRequest`] when `params` is not an
    /// object, since it cannot be expanded into a backend request.
    pub fn from_value(
        params: Option<Value>,
        default_model: &str,
    ) -> Result<Self, CompletionError> {
        let mut object = match params {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(object)) => object,
            Some(other) => {
                return Err(CompletionError::InvalidRequest(format!(
                    "params must be an object, got {}",
                    json_type_name(&other)
                )));
            }
        };

        let defaults = Self::with_defaults(default_model);
        Ok(Self {
            model: take_or(&mut object, "model", defaults.model),
            prompt: take_or(&mut object, "prompt", defaults.prompt),
            max_tokens: take_or(&mut object, "max_tokens", defaults.max_tokens),
            temperature: take_or(&mut object, "temperature", defaults.temperature),
            extra: object,
        })
    }
}

fn take_or(object: &mut Map<String, Value>, key: &str, default: Value) -> Value {
    object
        .remove(key)
        .filter(|value| !value.is_null())
        .unwrap_or(default)
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Normalized result of a completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResult {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<CompletionChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// One candidate continuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
    pub index: u32,
    /// `null` while the backend has not reported why generation stopped.
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
