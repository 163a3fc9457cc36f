//! Structured error bodies returned by the access manager service.
//!
//! A non-success response carries a body of the form:
//!
//! ```json
//! {
//!   "error": {
//!     "code": "UserNotFoundException",
//!     "message": "User 'bob' does not exist.",
//!     "target": "user",
//!     "attributes": [ { "name": "User", "value": "bob" } ],
//!     "innererror": { "code": "...", "message": "..." }
//!   }
//! }
//! ```
//!
//! `innererror` nests to any depth. [`ErrorResponse`] models one level of
//! that chain and links to the next.
//!
//! ## Nesting bound
//!
//! Bodies are parsed with `serde_json`'s default recursion limit of 128
//! nested containers. The envelope and the outer error take two of those,
//! so chains of more than about 120 inner errors are rejected as
//! [`DeserializationError::InvalidJson`], and the translator reports them
//! with the raw-body message.
//!
//! ## Leniency
//!
//! `code` and `message` are required at the top level. Everything else is
//! read leniently: a non-string `target` is ignored, malformed attribute
//! entries are skipped, and an `innererror` which fails to deserialize is
//! dropped rather than failing the outer error.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

const ERROR_PROPERTY: &str = "error";
const CODE_PROPERTY: &str = "code";
const MESSAGE_PROPERTY: &str = "message";
const TARGET_PROPERTY: &str = "target";
const ATTRIBUTES_PROPERTY: &str = "attributes";
const NAME_PROPERTY: &str = "name";
const VALUE_PROPERTY: &str = "value";
const INNER_ERROR_PROPERTY: &str = "innererror";

/// An error body could not be deserialized into an [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeserializationError {
    /// The body is not JSON.
    #[error("error response body is not valid JSON: {reason}")]
    InvalidJson { reason: String },

    /// The body has no top-level `error` object.
    #[error("error response does not contain an 'error' object")]
    MissingErrorObject,

    /// An `error` or `innererror` object lacks a required string property.
    #[error("error response 'error' or 'innererror' object does not contain a string '{field}' property")]
    MissingField { field: &'static str },
}

/// A name/value pair giving additional detail about an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorAttribute {
    pub name: String,
    pub value: String,
}

/// One level of a structured error returned by the service.
///
/// Immutable once built. Construct with [`ErrorResponse::new`] and the
/// `with_*` methods, or deserialize with [`ErrorResponse::from_json_str`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<ErrorAttribute>,
    #[serde(rename = "innererror", skip_serializing_if = "Option::is_none")]
    inner_error: Option<Box<ErrorResponse>>,
}

#[derive(Serialize)]
struct Envelope<'a> {
    error: &'a ErrorResponse,
}

impl ErrorResponse {
    /// Creates an error with the required code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            target: None,
            attributes: Vec::new(),
            inner_error: None,
        }
    }

    /// Sets the target of the error.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Appends an attribute. Duplicate names are kept.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(ErrorAttribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Sets the error which caused this one.
    #[must_use]
    pub fn with_inner_error(mut self, inner_error: ErrorResponse) -> Self {
        self.inner_error = Some(Box::new(inner_error));
        self
    }

    /// An internal code identifying the kind of error, e.g. `"GroupNotFoundException"`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable description of the error.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The target of the error, typically a parameter name.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Attributes in the order the service sent them.
    pub fn attributes(&self) -> &[ErrorAttribute] {
        &self.attributes
    }

    /// The error which caused this one, if any.
    pub fn inner_error(&self) -> Option<&ErrorResponse> {
        self.inner_error.as_deref()
    }

    /// Returns the value of the first attribute called `name`, or `""` if
    /// there is none.
    pub fn attribute(&self, name: &str) -> &str {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map_or("", |a| a.value.as_str())
    }

    /// Iterates this error followed by each inner error, outermost first.
    pub fn chain(&self) -> impl Iterator<Item = &ErrorResponse> {
        std::iter::successors(Some(self), |e| e.inner_error())
    }

    // -----------------------------------------------------------------------
    // Wire format
    // -----------------------------------------------------------------------

    /// Deserializes an error response body.
    ///
    /// # Errors
    ///
    /// Returns [`DeserializationError`] if the body is not JSON, has no
    /// `error` object, or the `error` object lacks `code` or `message`.
    pub fn from_json_str(body: &str) -> Result<Self, DeserializationError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| DeserializationError::InvalidJson {
                reason: e.to_string(),
            })?;
        Self::from_json(&value)
    }

    /// Deserializes an already-parsed error response document.
    ///
    /// # Errors
    ///
    /// See [`ErrorResponse::from_json_str`].
    pub fn from_json(document: &Value) -> Result<Self, DeserializationError> {
        match document.get(ERROR_PROPERTY) {
            Some(Value::Object(error)) => Self::from_error_object(error),
            _ => Err(DeserializationError::MissingErrorObject),
        }
    }

    /// Serializes this error as a complete response document, `{"error": {...}}`.
    ///
    /// # Errors
    ///
    /// Propagates [`serde_json::Error`]; serializing this type does not fail
    /// in practice.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(Envelope { error: self })
    }

    fn from_error_object(fields: &Map<String, Value>) -> Result<Self, DeserializationError> {
        let code = required_string(fields, CODE_PROPERTY)?;
        let message = required_string(fields, MESSAGE_PROPERTY)?;

        let target = fields
            .get(TARGET_PROPERTY)
            .and_then(Value::as_str)
            .map(str::to_owned);

        let attributes = fields
            .get(ATTRIBUTES_PROPERTY)
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(attribute_from_json).collect())
            .unwrap_or_default();

        let inner_error = match fields.get(INNER_ERROR_PROPERTY) {
            Some(Value::Object(inner)) => Self::from_error_object(inner).ok().map(Box::new),
            _ => None,
        };

        Ok(Self {
            code,
            message,
            target,
            attributes,
            inner_error,
        })
    }
}

fn required_string(
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<String, DeserializationError> {
    fields
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(DeserializationError::MissingField { field })
}

fn attribute_from_json(entry: &Value) -> Option<ErrorAttribute> {
    let name = entry.get(NAME_PROPERTY)?.as_str()?;
    let value = entry.get(VALUE_PROPERTY)?.as_str()?;
    Some(ErrorAttribute {
        name: name.to_owned(),
        value: value.to_owned(),
    })
}
