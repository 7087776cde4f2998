//! Composition root.
//!
//! The only place where the OpenAI adapter, the translator and the server
//! configuration are wired together.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use codexrpc_openai::{DefaultOpenAiClient, OpenAiClientConfig};
use codexrpc_server::{ServerConfig, Translator, TranslatorConfig};
use tracing::info;

use crate::credentials::{CredentialSource, resolve_api_key};
use crate::error::CliError;
use crate::parser::Cli;

/// Everything needed to start the gateway, resolved once at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub client: OpenAiClientConfig,
    pub translator: TranslatorConfig,
    /// Where the API key came from.
    pub credential_source: CredentialSource,
}

impl GatewayConfig {
    /// Build the startup configuration from parsed arguments.
    ///
    /// `fallback_key_file` is consulted only when neither a key nor a key
    /// file was given.
    pub fn from_cli(cli: &Cli, fallback_key_file: Option<&Path>) -> Result<Self, CliError> {
        if cli.timeout_secs == 0 {
            return Err(CliError::Config(
                "--timeout-secs must be greater than zero".to_string(),
            ));
        }

        let default_model = cli.default_model.trim();
        if default_model.is_empty() {
            return Err(CliError::Config(
                "--default-model must not be empty".to_string(),
            ));
        }

        let (api_key, credential_source) = resolve_api_key(
            cli.api_key.as_deref(),
            cli.api_key_file.as_deref(),
            fallback_key_file,
        )?;

        let client = OpenAiClientConfig::new(api_key)
            .with_base_url(cli.base_url.trim())
            .with_timeout(Duration::from_secs(cli.timeout_secs))
            .with_organization(cli.organization.clone());

        Ok(Self {
            server: ServerConfig {
                host: cli.host,
                port: cli.port,
            },
            client,
            translator: TranslatorConfig {
                default_model: default_model.to_string(),
            },
            credential_source,
        })
    }
}

/// Build the translator backed by the OpenAI client.
pub fn bootstrap(config: &GatewayConfig) -> Result<Arc<Translator>, CliError> {
    let client = DefaultOpenAiClient::new(&config.client)?;
    info!(
        credential_source = %config.credential_source,
        default_model = %config.translator.default_model,
        "Completion backend ready"
    );

    Ok(Arc::new(Translator::new(
        Arc::new(client),
        config.translator.clone(),
    )))
}
