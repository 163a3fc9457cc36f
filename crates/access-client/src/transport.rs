//! `reqwest` implementation of the [`HttpTransport`] port.

use access_domain::{HttpMethod, HttpResponse, HttpTransport, TransportFailure};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Method;
use tracing::debug;
use uuid::Uuid;

use crate::config::{ClientBuildError, ClientConfig};

/// Header carrying a fresh UUID per request, for correlating client and
/// server logs.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// HTTP transport backed by a pooled [`reqwest::Client`].
///
/// Every request carries `Accept: application/json`. Cloning is cheap and
/// shares the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport from the timeout, user agent and TLS settings in
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::InvalidConfig`] for a zero timeout and
    /// [`ClientBuildError::Http`] if the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientBuildError> {
        if config.timeout().is_zero() {
            return Err(ClientBuildError::invalid("timeout_ms must be greater than zero"));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(default_headers)
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self { http })
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, method: HttpMethod, url: &str) -> Result<HttpResponse, TransportFailure> {
        let request_id = Uuid::new_v4();

        let response = self
            .http
            .request(to_reqwest_method(method), url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await
            .map_err(|e| TransportFailure::with_source("request could not be completed", e))?;

        let status = response.status().as_u16();
        debug!(%request_id, status, "received response");

        let body = response
            .text()
            .await
            .map_err(|e| TransportFailure::with_source("response body could not be read", e))?;

        Ok(HttpResponse::new(status, body))
    }
}
