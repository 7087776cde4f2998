//! HTTP backend abstraction for the OpenAI API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest and makes exactly one attempt per call.

use crate::config::{ApiKey, OpenAiClientConfig};
use crate::error::{OpenAiError, OpenAiResult};
use crate::models::ApiErrorEnvelope;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Upper bound on how much of a non-JSON error body ends up in a message.
const MAX_ERROR_BODY_CHARS: usize = 512;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can POST JSON and decode a JSON answer.
///
/// This is an implementation detail - external code should use the
/// `CompletionPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST `body` as JSON to `url` and deserialize a 2xx response.
    async fn post_json<B, T>(&self, url: &Url, body: &B) -> OpenAiResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
#[derive(Debug)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    api_key: ApiKey,
    organization: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &OpenAiClientConfig) -> OpenAiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            organization: config.organization.clone(),
        })
    }

    fn build_request(&self, url: &Url) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .post(url.as_str())
            .bearer_auth(self.api_key.expose());
        if let Some(ref org) = self.organization {
            request = request.header("OpenAI-Organization", org);
        }
        request
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json<B, T>(&self, url: &Url, body: &B) -> OpenAiResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let response = self.build_request(url).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(error_from_body(status, &bytes));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Turn a non-2xx answer into an [`OpenAiError::Api`], preferring the
/// vendor's own message.
pub(crate) fn error_from_body(status: StatusCode, body: &[u8]) -> OpenAiError {
    if let Ok(envelope) = serde_json::from_slice::<ApiErrorEnvelope>(body) {
        debug!(
            status = status.as_u16(),
            kind = ?envelope.error.kind,
            code = ?envelope.error.code,
            "Completion API returned an error"
        );
        return OpenAiError::Api {
            status: status.as_u16(),
            message: envelope.error.message,
        };
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    let message = if text.is_empty() {
        format!("HTTP {status}")
    } else {
        let snippet: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("HTTP {status}: {snippet}")
    };

    OpenAiError::Api {
        status: status.as_u16(),
        message,
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_error_from_vendor_envelope() {
        let body = br#"{"error":{"message":"rate limit exceeded","type":"requests","param":null,"code":null}}"#;
        match error_from_body(StatusCode::TOO_MANY_REQUESTS, body) {
            OpenAiError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate limit exceeded");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_from_plain_body() {
        let err = error_from_body(StatusCode::BAD_GATEWAY, b"upstream down");
        assert_eq!(err.to_string(), "HTTP 502 Bad Gateway: upstream down");
    }

    #[test]
    fn test_error_from_empty_body() {
        let err = error_from_body(StatusCode::SERVICE_UNAVAILABLE, b"");
        assert_eq!(err.to_string(), "HTTP 503 Service Unavailable");
    }

    #[test]
    fn test_error_body_is_truncated() {
        let long = "x".repeat(MAX_ERROR_BODY_CHARS * 2);
        let err = error_from_body(StatusCode::INTERNAL_SERVER_ERROR, long.as_bytes());
        let prefix = "HTTP 500 Internal Server Error: ".len();
        assert_eq!(err.to_string().len(), prefix + MAX_ERROR_BODY_CHARS);
    }

    #[test]
    fn test_reqwest_backend_creation() {
        let config = OpenAiClientConfig::new(ApiKey::new("sk-test").unwrap())
            .with_timeout(Duration::from_secs(1))
            .with_organization(Some("org-1".to_string()));
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(backend.organization.as_deref(), Some("org-1"));
        assert!(!format!("{backend:?}").contains("sk-test"));
    }
}
