//! Client configuration file support.
//!
//! Configuration precedence (highest first):
//! 1. Explicit overrides (CLI flags)
//! 2. Environment variables (`AUDITOR_BASE_URL`, `AUDITOR_API_KEY`)
//! 3. Local config file (`./.auditorrc`)
//! 4. Global config file (`~/.auditor/config.toml`)
//! 5. Defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Credential sent in the `X-API-Key` header when nothing else is configured.
pub const DEFAULT_API_KEY: &str = "secret-token";

/// Environment variable overriding the backend address.
pub const BASE_URL_ENV: &str = "AUDITOR_BASE_URL";

/// Environment variable overriding the API key.
pub const API_KEY_ENV: &str = "AUDITOR_API_KEY";

/// Layered configuration as read from files and the environment.
///
/// Every field is optional so that layers can be merged; use
/// [`AuditorConfig::client_options`] to resolve defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditorConfig {
    /// Backend base address
    #[serde(default)]
    pub base_url: Option<String>,

    /// API key sent with every request
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds (no timeout when unset)
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Log level
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(String),

    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Resolved options handed to the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Backend base address without a trailing slash.
    pub base_url: String,
    /// API key for the `X-API-Key` header.
    pub api_key: String,
    /// Optional per-request timeout.
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            timeout: None,
        }
    }
}

impl ClientOptions {
    /// Creates options for the given address and key, without a timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            api_key: api_key.into(),
            timeout: None,
        }
    }
}

impl AuditorConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))
    }

    /// Get default global configuration file path.
    pub fn default_global_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".auditor")
            .join("config.toml")
    }

    /// Get default local configuration file path.
    pub fn default_local_path() -> PathBuf {
        PathBuf::from(".auditorrc")
    }

    /// Discover and load configuration files.
    ///
    /// Local config overrides global config. Missing files are skipped
    /// silently, unreadable ones with a warning.
    pub fn discover_and_load() -> Self {
        let mut config = Self::default();

        for path in [Self::default_global_path(), Self::default_local_path()] {
            match Self::load_from_file(&path) {
                Ok(found) => config.merge(&found),
                Err(ConfigError::NotFound(_)) => {}
                Err(e) => warn!(error = %e, "Ignoring configuration file"),
            }
        }

        config
    }

    /// Merge another configuration into this one.
    ///
    /// Values from `other` override values in `self` if they are Some.
    pub fn merge(&mut self, other: &Self) {
        if let Some(ref base_url) = other.base_url {
            self.base_url = Some(base_url.clone());
        }
        if let Some(ref api_key) = other.api_key {
            self.api_key = Some(api_key.clone());
        }
        if let Some(timeout_secs) = other.timeout_secs {
            self.timeout_secs = Some(timeout_secs);
        }
        if let Some(ref log_level) = other.log_level {
            self.log_level = Some(log_level.clone());
        }
    }

    /// Overlay environment variables using the given lookup.
    ///
    /// The lookup is injected so callers never mutate the process environment.
    pub fn merge_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = Self {
            base_url: lookup(BASE_URL_ENV).filter(|v| !v.is_empty()),
            api_key: lookup(API_KEY_ENV).filter(|v| !v.is_empty()),
            ..Self::default()
        };
        self.merge(&from_env);
    }

    /// Overlay the process environment.
    pub fn merge_env(&mut self) {
        self.merge_env_with(|key| std::env::var(key).ok());
    }

    /// Resolve the layered values into transport options.
    pub fn client_options(&self) -> ConfigResult<ClientOptions> {
        let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(format!(
                "base_url must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue("timeout_secs must be greater than 0".to_string()));
        }

        Ok(ClientOptions {
            base_url: normalize_base_url(base_url),
            api_key: self.api_key.clone().unwrap_or_else(|| DEFAULT_API_KEY.to_string()),
            timeout: self.timeout_secs.map(Duration::from_secs),
        })
    }
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
