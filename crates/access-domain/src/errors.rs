//! Caller-facing error taxonomy for access manager operations.
//!
//! [`AccessManagerError`] is what every client operation returns on failure.
//! The not-found variants carry the identifier of the missing resource so
//! callers can branch on it without parsing message text.
//!
//! | Variant | Produced when |
//! |---------|---------------|
//! | `Transport` | the HTTP exchange could not be completed |
//! | `GenericServer` | 500, an unmapped status, or an undecodable error body |
//! | `Validation` | 400 with a decodable error body |
//! | `NotFound` | 404 with an error code that names no element type |
//! | `ElementNotFound` | 404 for a missing user, group, entity type, or entity |
//! | `ResponseBody` | a success response body is not JSON |
//! | `Conversion` | a success response body has the wrong shape, or a codec rejected a value |

use std::fmt;

use thiserror::Error;

use crate::error_response::ErrorResponse;
use crate::shape::ConversionError;
use crate::transport::{HttpMethod, TransportFailure};

/// The kind of element an [`AccessManagerError::ElementNotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    User,
    Group,
    EntityType,
    Entity,
}

impl ElementType {
    /// The name used both for display and as the error attribute key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Group => "Group",
            Self::EntityType => "EntityType",
            Self::Entity => "Entity",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of an access manager operation.
#[derive(Debug, Error)]
pub enum AccessManagerError {
    /// The request never completed.
    #[error("Failed to call URL '{url}' with '{method}' method.")]
    Transport {
        method: HttpMethod,
        url: String,
        #[source]
        source: TransportFailure,
    },

    /// The server failed, or answered in a way with no more specific mapping.
    #[error("{message}")]
    GenericServer {
        message: String,
        status: u16,
        /// The decoded error body, when there was one.
        error_response: Option<Box<ErrorResponse>>,
    },

    /// The server rejected the request's parameters.
    #[error("{message}")]
    Validation {
        message: String,
        error_response: Box<ErrorResponse>,
    },

    /// A resource does not exist.
    #[error("{message}")]
    NotFound {
        message: String,
        /// Identifier of the missing resource; empty if the server did not say.
        resource_id: String,
        error_response: Box<ErrorResponse>,
    },

    /// A user, group, entity type, or entity does not exist.
    ///
    /// A refinement of [`AccessManagerError::NotFound`]: the element value
    /// is the resource id.
    #[error("{message}")]
    ElementNotFound {
        message: String,
        element_type: ElementType,
        element_value: String,
        error_response: Box<ErrorResponse>,
    },

    /// A success response body could not be parsed as JSON.
    #[error("Failed to parse response body from URL '{url}' with '{method}' method: {source}")]
    ResponseBody {
        method: HttpMethod,
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A success response body was valid JSON but did not fit the endpoint's contract.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl AccessManagerError {
    /// Returns `true` for both not-found variants.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::ElementNotFound { .. })
    }

    /// The identifier of the missing resource, for either not-found variant.
    pub fn resource_id(&self) -> Option<&str> {
        match self {
            Self::NotFound { resource_id, .. } => Some(resource_id),
            Self::ElementNotFound { element_value, .. } => Some(element_value),
            _ => None,
        }
    }

    /// The element type of an [`AccessManagerError::ElementNotFound`].
    pub fn element_type(&self) -> Option<ElementType> {
        match self {
            Self::ElementNotFound { element_type, .. } => Some(*element_type),
            _ => None,
        }
    }

    /// The element value of an [`AccessManagerError::ElementNotFound`].
    pub fn element_value(&self) -> Option<&str> {
        match self {
            Self::ElementNotFound { element_value, .. } => Some(element_value),
            _ => None,
        }
    }

    /// The decoded server error body behind this error, if there was one.
    ///
    /// Follow [`ErrorResponse::inner_error`] or [`ErrorResponse::chain`] to
    /// reach the causes reported by the server.
    pub fn error_response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::GenericServer { error_response, .. } => error_response.as_deref(),
            Self::Validation { error_response, .. }
            | Self::NotFound { error_response, .. }
            | Self::ElementNotFound { error_response, .. } => Some(error_response),
            _ => None,
        }
    }
}
