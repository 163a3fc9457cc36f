//! JSON shape vocabulary and the errors raised when a response body does not
//! have the shape an endpoint promises.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::codec::DecodeError;

// ---------------------------------------------------------------------------
// Shape vocabulary
// ---------------------------------------------------------------------------

/// The structural kind of a decoded JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Returns the kind of `value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        })
    }
}

/// Shape of a whole response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputShape {
    /// A JSON array.
    List,
    /// A JSON `true` or `false`.
    Boolean,
}

impl fmt::Display for InputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Boolean => "boolean",
        })
    }
}

/// Shape of one element of a list-shaped response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementShape {
    /// A bare JSON string.
    String,
    /// A JSON object whose requested fields hold strings.
    Object,
}

impl fmt::Display for ElementShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Object => "object",
        })
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A success-path response body violated its wire contract.
///
/// These are integration bugs, not transient conditions; nothing recovers
/// from them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The body as a whole had the wrong kind.
    #[error("expected {expected}-shaped input, got {actual}")]
    UnexpectedInput {
        expected: InputShape,
        actual: JsonKind,
    },

    /// The first element of a list was neither a string nor an object.
    #[error("expected string-shaped or object-shaped element, got {actual}")]
    UnsupportedElement { actual: JsonKind },

    /// A field name was given but the list holds bare strings.
    #[error("field name must not be supplied for string-shaped elements")]
    FieldNameSupplied,

    /// No field name was given but the list holds objects.
    #[error("field name must be supplied for object-shaped elements")]
    FieldNameMissing,

    /// An element did not match the shape inferred for (or required of) the list.
    #[error("expected {expected}-shaped element, got {actual}")]
    UnexpectedElement {
        expected: ElementShape,
        actual: JsonKind,
    },

    /// An object element lacked a requested field.
    #[error("missing key {key}")]
    MissingKey { key: String },

    /// A requested field held something other than a string.
    #[error("key {key} expected string value, got {actual}")]
    NonStringValue { key: String, actual: JsonKind },
}

/// Failure while converting a response body into typed elements.
///
/// Both variants are transparent: the caller sees the underlying
/// [`ShapeError`] or [`DecodeError`] unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_kind_names_every_value_kind() {
        let names: Vec<String> = [
            json!(null),
            json!(true),
            json!(1.5),
            json!("a"),
            json!([]),
            json!({}),
        ]
        .iter()
        .map(|v| JsonKind::of(v).to_string())
        .collect();

        assert_eq!(
            names,
            ["null", "boolean", "number", "string", "array", "object"]
        );
    }

    #[test]
    fn conversion_error_displays_inner_error_unchanged() {
        let err = ConversionError::from(ShapeError::MissingKey {
            key: "user".to_owned(),
        });
        assert_eq!(err.to_string(), "missing key user");
    }
}
