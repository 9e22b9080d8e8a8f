//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables (with optional
//! `.env` support) to keep deployment settings out of the code.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

pub const API_BASE_URL_VAR: &str = "FAQDESK_API_BASE_URL";
pub const SESSION_FILE_VAR: &str = "FAQDESK_SESSION_FILE";
pub const LOGIN_ENTRY_VAR: &str = "FAQDESK_LOGIN_ENTRY";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_LOGIN_ENTRY: &str = "login.html";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the FAQ backend API, without a trailing slash
    pub api_base_url: String,

    /// Where the durable session entries are kept
    pub session_file: PathBuf,

    /// Entry point callers navigate to when the session is torn down
    pub login_entry: String,
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let api_base_url = normalize_base_url(
            &lookup(API_BASE_URL_VAR).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        )?;

        let session_file = match lookup(SESSION_FILE_VAR) {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            Some(_) => return Err(ConfigError::Missing(SESSION_FILE_VAR)),
            None => default_session_file(),
        };

        let login_entry =
            lookup(LOGIN_ENTRY_VAR).unwrap_or_else(|| DEFAULT_LOGIN_ENTRY.to_string());

        tracing::debug!(
            api_base_url = %api_base_url,
            session_file = %session_file.display(),
            "Client configuration resolved"
        );

        Ok(Self {
            api_base_url,
            session_file,
            login_entry,
        })
    }
}

/// Default location of the session file: `<config dir>/faqdesk/session.json`
#[mutants::skip] // Depends on the host's home directory layout
pub fn default_session_file() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("faqdesk")
        .join("session.json")
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');

    if trimmed.is_empty() {
        return Err(ConfigError::Missing(API_BASE_URL_VAR));
    }

    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            key: API_BASE_URL_VAR,
            reason: "must start with http:// or https://".to_string(),
        });
    }

    Ok(trimmed.to_string())
}
