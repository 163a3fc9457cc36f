//! The HTTP-backed access manager client.
//!
//! [`AccessManagerClient`] implements both processor ports. Each operation
//! follows the same path:
//!
//! 1. encode the element arguments with the configured codecs and build the
//!    URL;
//! 2. send the request through the [`HttpTransport`];
//! 3. on a 2xx response, parse the body and run it through the shape
//!    converter; otherwise translate status and body into an
//!    [`AccessManagerError`].
//!
//! Converted sequences are drained before the operation returns, so every
//! shape or decode error surfaces from the operation itself.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use access_domain::{
    convert_boolean, convert_pairs, convert_pairs_to_set, convert_singles, convert_singles_to_set,
    translate_error, AccessManagerError, AccessResult, ConversionError, HttpMethod, HttpResponse,
    HttpTransport, IdentityCodec, StringCodec,
};
use serde_json::Value;
use tracing::{debug, info_span, Instrument};

use crate::config::{ClientBuildError, ClientConfig};
use crate::transport::ReqwestTransport;
use crate::urls::ApiUrls;

// ---------------------------------------------------------------------------
// Codecs
// ---------------------------------------------------------------------------

/// The codecs used to convert each element type to and from its wire string.
///
/// Entity types and entities are always plain strings and need no codec.
pub struct ElementCodecs<U, G, C, A> {
    pub user: Arc<dyn StringCodec<U>>,
    pub group: Arc<dyn StringCodec<G>>,
    pub application_component: Arc<dyn StringCodec<C>>,
    pub access_level: Arc<dyn StringCodec<A>>,
}

impl<U, G, C, A> ElementCodecs<U, G, C, A> {
    pub fn new(
        user: impl StringCodec<U> + 'static,
        group: impl StringCodec<G> + 'static,
        application_component: impl StringCodec<C> + 'static,
        access_level: impl StringCodec<A> + 'static,
    ) -> Self {
        Self {
            user: Arc::new(user),
            group: Arc::new(group),
            application_component: Arc::new(application_component),
            access_level: Arc::new(access_level),
        }
    }
}

impl ElementCodecs<String, String, String, String> {
    /// Codecs for a client whose elements are all plain strings.
    pub fn identity() -> Self {
        Self::new(IdentityCodec, IdentityCodec, IdentityCodec, IdentityCodec)
    }
}

impl<U, G, C, A> Clone for ElementCodecs<U, G, C, A> {
    fn clone(&self) -> Self {
        Self {
            user: Arc::clone(&self.user),
            group: Arc::clone(&self.group),
            application_component: Arc::clone(&self.application_component),
            access_level: Arc::clone(&self.access_level),
        }
    }
}

impl<U, G, C, A> fmt::Debug for ElementCodecs<U, G, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementCodecs").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for an access manager instance hosted as a REST API.
///
/// Generic over the user (`U`), group (`G`), application component (`C`)
/// and access level (`A`) types; see [`ElementCodecs`]. The client holds no
/// mutable state and may be shared freely between tasks.
pub struct AccessManagerClient<U, G, C, A> {
    urls: ApiUrls,
    transport: Arc<dyn HttpTransport>,
    pub(crate) codecs: ElementCodecs<U, G, C, A>,
}

impl<U, G, C, A> AccessManagerClient<U, G, C, A> {
    /// Creates a client using a [`ReqwestTransport`] built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] if `config` is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &ClientConfig, codecs: ElementCodecs<U, G, C, A>) -> Result<Self, ClientBuildError> {
        config.validate()?;
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(&config.base_url, Arc::new(transport), codecs))
    }

    /// Creates a client sending its requests through `transport`.
    pub fn with_transport(
        base_url: &str,
        transport: Arc<dyn HttpTransport>,
        codecs: ElementCodecs<U, G, C, A>,
    ) -> Self {
        Self {
            urls: ApiUrls::new(base_url),
            transport,
            codecs,
        }
    }

    pub(crate) fn urls(&self) -> &ApiUrls {
        &self.urls
    }

    // -- Request plumbing -----------------------------------------------------

    /// Sends one request and returns the response if its status is 2xx.
    async fn send(&self, method: HttpMethod, url: &str) -> AccessResult<HttpResponse> {
        let span = info_span!("access_manager_request", %method, url);
        async {
            match self.transport.send(method, url).await {
                Ok(response) => {
                    debug!(status = response.status, "access manager responded");
                    if response.is_success() {
                        Ok(response)
                    } else {
                        Err(translate_error(response.status, &response.body, method, url))
                    }
                }
                Err(source) => Err(AccessManagerError::Transport {
                    method,
                    url: url.to_owned(),
                    source,
                }),
            }
        }
        .instrument(span)
        .await
    }

    /// Sends a mutation; the response body is ignored.
    pub(crate) async fn send_event(&self, method: HttpMethod, url: String) -> AccessResult<()> {
        self.send(method, &url).await.map(|_| ())
    }

    /// Sends a GET and parses the response body as JSON.
    pub(crate) async fn get_json(&self, url: String) -> AccessResult<Value> {
        let response = self.send(HttpMethod::Get, &url).await?;
        serde_json::from_str(&response.body).map_err(|source| AccessManagerError::ResponseBody {
            method: HttpMethod::Get,
            url,
            source,
        })
    }

    /// Sends a GET for a single resource, answering `false` when the server
    /// reports it as not found.
    pub(crate) async fn contains(&self, url: String) -> AccessResult<bool> {
        match self.send(HttpMethod::Get, &url).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Sends a GET to an access check endpoint.
    pub(crate) async fn get_bool(&self, url: String) -> AccessResult<bool> {
        let body = self.get_json(url).await?;
        convert_boolean(&body).map_err(|e| ConversionError::from(e).into())
    }

    pub(crate) async fn get_list<T>(
        &self,
        url: String,
        codec: &dyn StringCodec<T>,
        field_name: Option<&str>,
    ) -> AccessResult<Vec<T>> {
        let body = self.get_json(url).await?;
        Ok(convert_singles(body, codec, field_name).collect::<Result<_, _>>()?)
    }

    pub(crate) async fn get_set<T: Eq + Hash>(
        &self,
        url: String,
        codec: &dyn StringCodec<T>,
        field_name: &str,
    ) -> AccessResult<HashSet<T>> {
        let body = self.get_json(url).await?;
        Ok(convert_singles_to_set(body, codec, Some(field_name))?)
    }

    pub(crate) async fn get_pairs<P, Q>(
        &self,
        url: String,
        field_names: (&str, &str),
        codecs: (&dyn StringCodec<P>, &dyn StringCodec<Q>),
    ) -> AccessResult<Vec<(P, Q)>> {
        let body = self.get_json(url).await?;
        Ok(convert_pairs(body, field_names.0, field_names.1, codecs.0, codecs.1)
            .collect::<Result<_, _>>()?)
    }

    pub(crate) async fn get_pair_set<P: Eq + Hash, Q: Eq + Hash>(
        &self,
        url: String,
        field_names: (&str, &str),
        codecs: (&dyn StringCodec<P>, &dyn StringCodec<Q>),
    ) -> AccessResult<HashSet<(P, Q)>> {
        let body = self.get_json(url).await?;
        Ok(convert_pairs_to_set(
            body,
            field_names.0,
            field_names.1,
            codecs.0,
            codecs.1,
        )?)
    }
}

impl<U, G, C, A> fmt::Debug for AccessManagerClient<U, G, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessManagerClient")
            .field("api_root", &self.urls.root())
            .finish_non_exhaustive()
    }
}
