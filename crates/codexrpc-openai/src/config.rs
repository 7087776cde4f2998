//! Public configuration for the OpenAI client.
//!
//! This module provides a stable public API for configuring the client.
//! The credential is supplied by the caller; this crate never looks it up.

use std::fmt;
use std::time::Duration;

/// Default API root. `completions` is resolved relative to it.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// An API credential.
///
/// `Debug` is redacted so the key can sit inside logged config structs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, trimming surrounding whitespace. Returns `None` when
    /// nothing remains.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The key itself, for building the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Configuration for the OpenAI client.
///
/// # Example
///
/// ```
/// use codexrpc_openai::{ApiKey, OpenAiClientConfig};
/// use std::time::Duration;
///
/// let key = ApiKey::new("sk-test").unwrap();
/// let config = OpenAiClientConfig::new(key)
///     .with_timeout(Duration::from_secs(30))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct OpenAiClientConfig {
    /// API root, e.g. `https://api.openai.com/v1`
    pub(crate) base_url: String,
    /// Bearer credential
    pub(crate) api_key: ApiKey,
    /// Optional `OpenAI-Organization` header value
    pub(crate) organization: Option<String>,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
}

impl OpenAiClientConfig {
    /// Create a configuration with default settings and the given key.
    #[must_use]
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            organization: None,
            user_agent: concat!("codexrpc/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Set the API root.
    ///
    /// Defaults to `https://api.openai.com/v1`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 60 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set an optional organization id.
    #[must_use]
    pub fn with_organization(mut self, organization: Option<String>) -> Self {
        self.organization = organization.filter(|org| !org.trim().is_empty());
        self
    }
}
