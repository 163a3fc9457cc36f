//! String codecs for access manager elements.
//!
//! Every element held by an access manager (users, groups, application
//! components, access levels, entities) travels over the wire as a string
//! which uniquely identifies it. A [`StringCodec`] converts between the
//! caller's element type and that string in both directions.
//!
//! Codecs produce the raw identifying string only. Percent-encoding for URL
//! paths is applied by the URL builder in `access-client`, never here.
//!
//! ## Provided codecs
//!
//! | Codec | Element type |
//! |-------|--------------|
//! | [`IdentityCodec`] | `String` (the default for entity types and entities) |
//! | [`DisplayCodec`] | any `T: Display + FromStr`, e.g. an access level enum |
//! | [`FnCodec`] | any type, from a pair of closures |

use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A codec rejected a wire string.
///
/// Produced by [`StringCodec::decode`] when `text` is not a valid encoding of
/// the target type, for example an enumerated type receiving an unknown label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to decode '{text}' as {target}: {reason}")]
pub struct DecodeError {
    /// The wire string that could not be decoded.
    pub text: String,
    /// Name of the type the codec decodes to.
    pub target: String,
    /// Why the string was rejected.
    pub reason: String,
}

impl DecodeError {
    /// Creates a new [`DecodeError`].
    pub fn new(
        text: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            target: target.into(),
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Codec contract
// ---------------------------------------------------------------------------

/// Converts values of type `T` to and from a string which uniquely identifies
/// the value.
///
/// Implementations must be deterministic and free of side effects, and must
/// satisfy the round-trip law `decode(&encode(x)) == Ok(x)` for every valid
/// `x`. Codecs are shared between concurrently running requests, hence the
/// `Send + Sync` bound.
pub trait StringCodec<T>: Send + Sync {
    /// Converts `value` into the string which uniquely identifies it.
    fn encode(&self, value: &T) -> String;

    /// Converts an identifying string back into a value.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if `text` is not a valid encoding.
    fn decode(&self, text: &str) -> Result<T, DecodeError>;
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Codec for elements which are plain strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityCodec;

impl StringCodec<String> for IdentityCodec {
    fn encode(&self, value: &String) -> String {
        value.clone()
    }

    fn decode(&self, text: &str) -> Result<String, DecodeError> {
        Ok(text.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Display / FromStr
// ---------------------------------------------------------------------------

/// Codec for any type whose [`Display`] output is parsed back by its
/// [`FromStr`] implementation.
///
/// The type's two implementations must agree; the codec inherits the
/// round-trip law from them.
pub struct DisplayCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> DisplayCodec<T> {
    /// Creates a new [`DisplayCodec`].
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for DisplayCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for DisplayCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for DisplayCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DisplayCodec<{}>", std::any::type_name::<T>())
    }
}

impl<T> StringCodec<T> for DisplayCodec<T>
where
    T: Display + FromStr,
    T::Err: Display,
{
    fn encode(&self, value: &T) -> String {
        value.to_string()
    }

    fn decode(&self, text: &str) -> Result<T, DecodeError> {
        text.parse::<T>()
            .map_err(|e| DecodeError::new(text, std::any::type_name::<T>(), e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Closures
// ---------------------------------------------------------------------------

/// Codec assembled from an `encode` closure and a fallible `decode` closure.
pub struct FnCodec<T, E, D> {
    encode: E,
    decode: D,
    _marker: PhantomData<fn() -> T>,
}

impl<T, E, D> FnCodec<T, E, D>
where
    E: Fn(&T) -> String + Send + Sync,
    D: Fn(&str) -> Result<T, DecodeError> + Send + Sync,
{
    /// Creates a codec from the two conversion closures.
    pub fn new(encode: E, decode: D) -> Self {
        Self {
            encode,
            decode,
            _marker: PhantomData,
        }
    }
}

impl<T, E, D> StringCodec<T> for FnCodec<T, E, D>
where
    E: Fn(&T) -> String + Send + Sync,
    D: Fn(&str) -> Result<T, DecodeError> + Send + Sync,
{
    fn encode(&self, value: &T) -> String {
        (self.encode)(value)
    }

    fn decode(&self, text: &str) -> Result<T, DecodeError> {
        (self.decode)(text)
    }
}
