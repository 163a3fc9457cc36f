//! Access manager HTTP client.
//!
//! Implements the [`access_domain::AccessManagerEventProcessor`] and
//! [`access_domain::AccessManagerQueryProcessor`] ports against an access
//! manager instance hosted as a REST API.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** URL construction, the `reqwest` transport, and the
//! per-operation request plumbing live here. Response conversion and error
//! translation are delegated to [`access_domain`].
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`config`] | `ClientConfig` and `ClientBuildError` |
//! | [`urls`] | `ApiUrls`, the endpoint URL templates |
//! | [`transport`] | `ReqwestTransport` |
//! | `client` | `AccessManagerClient`, `ElementCodecs` |
//! | `events` | Event processor implementation |
//! | `queries` | Query processor implementation |
//!
//! ## Example
//!
//! ```no_run
//! use access_client::{AccessManagerClient, ClientConfig, ElementCodecs};
//! use access_domain::AccessManagerQueryProcessor;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("http://127.0.0.1:5170/");
//! let client = AccessManagerClient::new(&config, ElementCodecs::identity())?;
//! for user in client.users().await? {
//!     println!("{user}");
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
mod events;
mod queries;
pub mod transport;
pub mod urls;

pub use client::{AccessManagerClient, ElementCodecs};
pub use config::{ClientBuildError, ClientConfig};
pub use transport::{ReqwestTransport, REQUEST_ID_HEADER};
pub use urls::ApiUrls;
