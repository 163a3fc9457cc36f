//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_user_agent() -> String {
    format!("access-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Settings for an [`AccessManagerClient`](crate::AccessManagerClient) and
/// its [`ReqwestTransport`](crate::ReqwestTransport).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root URL of the access manager service, e.g. `http://127.0.0.1:5170/`.
    ///
    /// A missing trailing `/` is added; `api/v1/` is appended to form the
    /// API root.
    pub base_url: String,

    /// Per-request timeout in milliseconds, covering connect, send and
    /// receive.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Skip TLS certificate validation. Only for test deployments with
    /// self-signed certificates.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl ClientConfig {
    /// Creates a configuration with defaults for everything but the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: default_user_agent(),
            accept_invalid_certs: false,
        }
    }

    /// Sets the per-request timeout. Sub-millisecond parts round up, so a
    /// non-zero duration never becomes zero.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_nanos().div_ceil(1_000_000);
        self.timeout_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Checks the settings that cannot be caught at deserialization time.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::InvalidConfig`] if the base URL is empty
    /// or does not use the `http` or `https` scheme, or the timeout is zero.
    pub fn validate(&self) -> Result<(), ClientBuildError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(ClientBuildError::invalid("base_url must not be empty"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientBuildError::invalid(format!(
                "base_url '{base_url}' must start with http:// or https://"
            )));
        }
        if self.timeout_ms == 0 {
            return Err(ClientBuildError::invalid("timeout_ms must be greater than zero"));
        }
        Ok(())
    }
}

/// Failure to construct a client or transport.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("invalid client configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientBuildError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
