//! `accessctl` configuration: TOML file, environment overrides, validation.
//!
//! ```toml
//! log_level = "info"
//! log_format = "pretty"
//!
//! [client]
//! base_url = "http://127.0.0.1:5170/"
//! timeout_ms = 30000
//! ```
//!
//! Precedence, lowest first: file, environment, command line.

use std::path::Path;

use access_client::ClientConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding `client.base_url`.
pub const BASE_URL_ENV: &str = "ACCESSCTL_BASE_URL";

/// Environment variable overriding `log_level`.
pub const LOG_LEVEL_ENV: &str = "ACCESSCTL_LOG_LEVEL";

const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    #[error("failed to parse config: {reason}")]
    Parse { reason: String },

    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_log_level() -> String {
    "warn".to_owned()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessctlConfig {
    /// Connection settings. Absent until a file, `ACCESSCTL_BASE_URL` or
    /// `--base-url` supplies a base URL.
    #[serde(default)]
    pub client: Option<ClientConfig>,

    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for AccessctlConfig {
    fn default() -> Self {
        Self {
            client: None,
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl AccessctlConfig {
    /// Sets the base URL, creating the client section if needed.
    pub fn set_base_url(&mut self, base_url: String) {
        match &mut self.client {
            Some(client) => client.base_url = base_url,
            None => self.client = Some(ClientConfig::new(base_url)),
        }
    }

    /// The validated client section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if no base URL was configured or the
    /// client settings are invalid.
    pub fn client(&self) -> Result<&ClientConfig, ConfigError> {
        let client = self.client.as_ref().ok_or_else(|| ConfigError::Invalid {
            reason: format!("no base URL configured; set [client] base_url, {BASE_URL_ENV}, or --base-url"),
        })?;
        client.validate().map_err(|e| ConfigError::Invalid {
            reason: e.to_string(),
        })?;
        Ok(client)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Loads the configuration from an optional TOML file and applies
/// environment overrides.
///
/// # Errors
///
/// Returns [`ConfigError::FileNotFound`] if `path` cannot be read and
/// [`ConfigError::Parse`] if it is not valid TOML for [`AccessctlConfig`].
pub fn load_config(path: Option<&Path>) -> Result<AccessctlConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|_| ConfigError::FileNotFound {
                path: p.display().to_string(),
            })?;
            parse_toml(&content)?
        }
        None => AccessctlConfig::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

pub fn parse_toml(content: &str) -> Result<AccessctlConfig, ConfigError> {
    toml::from_str::<AccessctlConfig>(content).map_err(|e| ConfigError::Parse {
        reason: e.to_string(),
    })
}

/// Applies `ACCESSCTL_BASE_URL` and `ACCESSCTL_LOG_LEVEL`.
pub fn apply_env_overrides(config: &mut AccessctlConfig) {
    apply_overrides(config, |name| std::env::var(name).ok());
}

fn apply_overrides(config: &mut AccessctlConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup(BASE_URL_ENV) {
        config.set_base_url(val);
    }
    if let Some(val) = lookup(LOG_LEVEL_ENV) {
        config.log_level = val;
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Checks the settings needed before any request is made.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] for an unknown log level or an invalid
/// client section.
pub fn validate_config(config: &AccessctlConfig) -> Result<(), ConfigError> {
    if !VALID_LOG_LEVELS.contains(&config.log_level.as_str()) {
        return Err(ConfigError::Invalid {
            reason: format!("invalid log_level '{}'", config.log_level),
        });
    }
    config.client().map(|_| ())
}
