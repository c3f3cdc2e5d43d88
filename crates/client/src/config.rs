//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STORE_API_BASE` - Backend base URL (default: `http://127.0.0.1:8000`)
//! - `STORE_STATE_DIR` - Directory holding the cart and session files
//!   (default: `.store-state`)
//! - `STORE_API_TIMEOUT_SECS` - Per-request timeout; unset means no timeout
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Backend used when `STORE_API_BASE` is unset.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// State directory used when `STORE_STATE_DIR` is unset.
pub const DEFAULT_STATE_DIR: &str = ".store-state";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Console client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL relative API paths are appended to (validated http(s))
    pub api_base: String,
    /// Where durable state lives
    pub state_dir: PathBuf,
    /// Request timeout, if any
    pub timeout: Option<Duration>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            timeout: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let api_base = parse_api_base(
            "STORE_API_BASE",
            &get_env_or_default("STORE_API_BASE", DEFAULT_API_BASE),
        )?;
        let state_dir = PathBuf::from(get_env_or_default("STORE_STATE_DIR", DEFAULT_STATE_DIR));
        let timeout = get_optional_env("STORE_API_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| {
                        ConfigError::InvalidEnvVar(
                            "STORE_API_TIMEOUT_SECS".to_string(),
                            e.to_string(),
                        )
                    })
            })
            .transpose()?;

        Ok(Self {
            api_base,
            state_dir,
            timeout,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration pointing at `api_base` with every other value defaulted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `api_base` is not an http(s) URL.
    pub fn with_api_base(api_base: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: parse_api_base("api_base", api_base)?,
            ..Self::default()
        })
    }
}

fn parse_api_base(key: &str, raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme {}", url.scheme()),
        ));
    }
    Ok(raw.trim().trim_end_matches('/').to_string())
}

/// Get an optional, non-empty environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, "http://127.0.0.1:8000");
        assert_eq!(config.state_dir, PathBuf::from(".store-state"));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_with_api_base_validates_scheme() {
        let config = ClientConfig::with_api_base("https://api.tienda.bo/").unwrap();
        assert_eq!(config.api_base, "https://api.tienda.bo");
        assert!(matches!(
            ClientConfig::with_api_base("ftp://api.tienda.bo"),
            Err(ConfigError::InvalidEnvVar(..))
        ));
        assert!(ClientConfig::with_api_base("not a url").is_err());
    }
}
