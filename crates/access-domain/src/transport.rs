//! HTTP transport port.
//!
//! The domain never performs I/O. It describes the one capability it needs
//! from the outside world, "send a request and hand back status and body",
//! as the [`HttpTransport`] trait. `access-client` supplies the `reqwest`
//! implementation; tests supply scripted ones.

use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// HTTP methods used by the access manager API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed HTTP exchange.
///
/// Returned for every response the server sent, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Numeric HTTP status code.
    pub status: u16,
    /// Response body decoded as text. Empty when the server sent no body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new [`HttpResponse`].
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request could not be completed at all: connection refused, DNS
/// failure, timeout, or the body could not be read.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportFailure {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl TransportFailure {
    /// Creates a failure with no underlying cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a failure wrapping the transport library's error.
    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Description of what failed.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Sends HTTP requests on behalf of the client.
///
/// Implementations return `Ok` for any response received, including 4xx and
/// 5xx; status interpretation belongs to the caller. Only a failure to
/// complete the exchange is an `Err`. Timeouts, TLS, connection reuse and
/// headers are the implementation's concern.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends a body-less request with `method` to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportFailure`] if no response could be obtained.
    async fn send(&self, method: HttpMethod, url: &str) -> Result<HttpResponse, TransportFailure>;
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io;

    use super::*;

    #[test]
    fn failure_keeps_message_and_source() {
        let failure = TransportFailure::with_source(
            "request could not be completed",
            io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        );

        assert_eq!(failure.message(), "request could not be completed");
        assert_eq!(failure.to_string(), "request could not be completed");
        assert_eq!(failure.source().map(ToString::to_string).as_deref(), Some("refused"));
    }

    #[test]
    fn failure_without_cause_has_no_source() {
        let failure = TransportFailure::new("no route");
        assert_eq!(failure.message(), "no route");
        assert!(failure.source().is_none());
    }

    #[test]
    fn only_2xx_is_success() {
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(300, "").is_success());
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
