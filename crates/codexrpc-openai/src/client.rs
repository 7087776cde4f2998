//! OpenAI client for the legacy Completions endpoint.

use std::fmt;

use crate::config::OpenAiClientConfig;
use crate::error::OpenAiResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::{ApiCompletionRequest, ApiCompletionResponse};
use tracing::debug;
use url::Url;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default OpenAI client using the reqwest HTTP backend.
pub type DefaultOpenAiClient = OpenAiClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the Completions endpoint.
///
/// Generic over an HTTP backend so tests can substitute a fake. Use
/// `DefaultOpenAiClient` in production code.
pub struct OpenAiClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) completions_url: Url,
}

impl DefaultOpenAiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &OpenAiClientConfig) -> OpenAiResult<Self> {
        let completions_url = completions_url(&config.base_url)?;
        let backend = ReqwestBackend::new(config)?;
        Ok(Self {
            backend,
            completions_url,
        })
    }
}

impl<B: HttpBackend> OpenAiClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) fn with_backend(base_url: &str, backend: B) -> OpenAiResult<Self> {
        Ok(Self {
            backend,
            completions_url: completions_url(base_url)?,
        })
    }

    /// Issue one completion request.
    pub(crate) async fn create_completion(
        &self,
        request: &ApiCompletionRequest,
    ) -> OpenAiResult<ApiCompletionResponse> {
        debug!(
            url = %self.completions_url,
            model = %request.model,
            max_tokens = %request.max_tokens,
            "Sending completion request"
        );
        self.backend.post_json(&self.completions_url, request).await
    }
}

impl<B: HttpBackend> fmt::Debug for OpenAiClient<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("completions_url", &self.completions_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Resolve `<base>/completions`, tolerating a base with or without a
/// trailing slash.
fn completions_url(base_url: &str) -> OpenAiResult<Url> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(Url::parse(&base)?.join("completions")?)
}
