//! API key discovery.
//!
//! Lookup order:
//! 1. `--api-key` / `OPENAI_API_KEY` (including a value loaded from `.env`)
//! 2. `--api-key-file` / `OPENAI_API_KEY_FILE`
//! 3. `<config dir>/codexrpc/api_key`, if it exists
//!
//! Discovery runs once at startup and never prompts.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use codexrpc_openai::ApiKey;
use thiserror::Error;

/// Where the key was found. Logged at startup instead of the key itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    File(PathBuf),
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "OPENAI_API_KEY"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Errors from API key discovery. All are fatal at startup.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error(
        "No OpenAI API key found. Set OPENAI_API_KEY (directly or in .env), pass --api-key, or write the key to {}",
        display_fallback(.fallback.as_deref())
    )]
    Missing { fallback: Option<PathBuf> },

    #[error("Failed to read API key file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("API key file {} is empty", .path.display())]
    EmptyFile { path: PathBuf },
}

fn display_fallback(path: Option<&Path>) -> String {
    path.map_or_else(
        || "a file passed with --api-key-file".to_string(),
        |p| p.display().to_string(),
    )
}

/// Default key file location: `<config dir>/codexrpc/api_key`.
pub fn default_key_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("codexrpc").join("api_key"))
}

/// Resolve the API key from the given sources.
///
/// A blank `explicit` value counts as unset. An explicitly named key file
/// must exist and hold a key; the fallback file is skipped when absent.
pub fn resolve_api_key(
    explicit: Option<&str>,
    key_file: Option<&Path>,
    fallback_file: Option<&Path>,
) -> Result<(ApiKey, CredentialSource), CredentialError> {
    if let Some(key) = explicit.and_then(ApiKey::new) {
        return Ok((key, CredentialSource::Environment));
    }

    if let Some(path) = key_file {
        return read_key_file(path);
    }

    match fallback_file {
        Some(path) if path.is_file() => read_key_file(path),
        _ => Err(CredentialError::Missing {
            fallback: fallback_file.map(Path::to_path_buf),
        }),
    }
}

fn read_key_file(path: &Path) -> Result<(ApiKey, CredentialSource), CredentialError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CredentialError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    ApiKey::new(contents)
        .map(|key| (key, CredentialSource::File(path.to_path_buf())))
        .ok_or_else(|| CredentialError::EmptyFile {
            path: path.to_path_buf(),
        })
}
