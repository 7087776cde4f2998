//! Command-line and environment configuration.
//!
//! Every option can also come from an environment variable. `.env` is loaded
//! before parsing, so values there behave exactly like exported variables.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use codexrpc_core::DEFAULT_MODEL;
use codexrpc_openai::DEFAULT_BASE_URL;
use codexrpc_server::server::DEFAULT_PORT;

/// Default backend request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// JSON-RPC 2.0 gateway to the OpenAI Completions API.
#[derive(Debug, Parser)]
#[command(name = "codexrpc")]
#[command(about = "Serve the OpenAI Completions API as a JSON-RPC 2.0 endpoint")]
#[command(version)]
pub struct Cli {
    /// Interface to listen on
    #[arg(long, env = "CODEXRPC_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// OpenAI API key
    #[arg(long = "api-key", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// File holding the API key, used when no key is given directly
    #[arg(long = "api-key-file", env = "OPENAI_API_KEY_FILE")]
    pub api_key_file: Option<PathBuf>,

    /// API root the `completions` endpoint is resolved against
    #[arg(long = "base-url", env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Model used when a request does not name one
    #[arg(long = "default-model", env = "CODEXRPC_DEFAULT_MODEL", default_value = DEFAULT_MODEL)]
    pub default_model: String,

    /// Backend request timeout in seconds
    #[arg(long = "timeout-secs", env = "CODEXRPC_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// OpenAI organization id sent with each backend request
    #[arg(long, env = "OPENAI_ORGANIZATION")]
    pub organization: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Parse `args` with every `env` fallback switched off, so results do not
/// depend on the calling environment.
#[cfg(test)]
pub(crate) fn parse_args_only<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    use clap::{CommandFactory, FromArgMatches};

    let matches = Cli::command()
        .mut_args(|arg| arg.env(None))
        .try_get_matches_from(args)?;
    Cli::from_arg_matches(&matches)
}
