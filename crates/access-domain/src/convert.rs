//! Conversion of list-shaped JSON response bodies into typed elements.
//!
//! Access manager endpoints answer with one of two homogeneous shapes:
//!
//! - an array of strings, e.g. `["user1", "user2"]`;
//! - an array of objects with one or two string fields, e.g.
//!   `[{"user": "user1", "group": "group1"}]`.
//!
//! [`convert_singles`] turns either shape into a sequence of single values
//! and [`convert_pairs`] turns an object array into a sequence of pairs. Each
//! wire string is decoded with a caller-supplied [`StringCodec`].
//!
//! ## Laziness
//!
//! Both functions return iterators which do no work until polled. Shape and
//! decode errors are yielded as `Err` items at the element where they occur,
//! after which the iterator is exhausted. An iterator is single-pass: once
//! drained it yields nothing further. Drain it inside whatever scope handles
//! the errors.
//!
//! ## Shape inference
//!
//! [`convert_singles`] decides between the string and object layouts from the
//! **first element only**. Every later element must have the same shape; a
//! mismatch fails at the mismatched element, so the error reported for a
//! heterogeneous array depends on element order.

use std::collections::HashSet;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use serde_json::{Map, Value};

use crate::codec::StringCodec;
use crate::shape::{ConversionError, ElementShape, InputShape, JsonKind, ShapeError};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

enum State {
    Pending(Value),
    Elements(std::vec::IntoIter<Value>),
    Done,
}

impl State {
    /// Moves a pending input into the element phase, checking it is an array.
    fn start(&mut self) -> Result<(), ShapeError> {
        if !matches!(self, Self::Pending(_)) {
            return Ok(());
        }
        let Self::Pending(input) = std::mem::replace(self, Self::Done) else {
            return Ok(());
        };
        match input {
            Value::Array(elements) => {
                *self = Self::Elements(elements.into_iter());
                Ok(())
            }
            other => Err(ShapeError::UnexpectedInput {
                expected: InputShape::List,
                actual: JsonKind::of(&other),
            }),
        }
    }

    fn next_element(&mut self) -> Option<Value> {
        match self {
            Self::Elements(elements) => elements.next(),
            Self::Pending(_) | Self::Done => None,
        }
    }
}

fn require_key(fields: &Map<String, Value>, key: &str) -> Result<(), ShapeError> {
    if fields.contains_key(key) {
        Ok(())
    } else {
        Err(ShapeError::MissingKey {
            key: key.to_owned(),
        })
    }
}

fn string_field<'v>(fields: &'v Map<String, Value>, key: &str) -> Result<&'v str, ShapeError> {
    match fields.get(key) {
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(ShapeError::NonStringValue {
            key: key.to_owned(),
            actual: JsonKind::of(other),
        }),
        None => Err(ShapeError::MissingKey {
            key: key.to_owned(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Singles
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Layout<'a> {
    Strings,
    Objects(&'a str),
}

fn infer_layout<'a>(first: &Value, field_name: Option<&'a str>) -> Result<Layout<'a>, ShapeError> {
    match (first, field_name) {
        (Value::String(_), None) => Ok(Layout::Strings),
        (Value::String(_), Some(_)) => Err(ShapeError::FieldNameSupplied),
        (Value::Object(_), Some(key)) => Ok(Layout::Objects(key)),
        (Value::Object(_), None) => Err(ShapeError::FieldNameMissing),
        (other, _) => Err(ShapeError::UnsupportedElement {
            actual: JsonKind::of(other),
        }),
    }
}

/// Lazy sequence returned by [`convert_singles`].
pub struct Singles<'a, T, C: ?Sized> {
    state: State,
    layout: Option<Layout<'a>>,
    field_name: Option<&'a str>,
    codec: &'a C,
    _marker: PhantomData<fn() -> T>,
}

impl<T, C> Singles<'_, T, C>
where
    C: StringCodec<T> + ?Sized,
{
    fn advance(&mut self) -> Option<Result<T, ConversionError>> {
        if let Err(e) = self.state.start() {
            return Some(Err(e.into()));
        }
        let element = self.state.next_element()?;

        let layout = match self.layout {
            Some(layout) => layout,
            None => match infer_layout(&element, self.field_name) {
                Ok(layout) => *self.layout.insert(layout),
                Err(e) => return Some(Err(e.into())),
            },
        };

        Some(self.convert(layout, element))
    }

    fn convert(&self, layout: Layout<'_>, element: Value) -> Result<T, ConversionError> {
        match (layout, element) {
            (Layout::Strings, Value::String(text)) => Ok(self.codec.decode(&text)?),
            (Layout::Objects(key), Value::Object(fields)) => {
                Ok(self.codec.decode(string_field(&fields, key)?)?)
            }
            (Layout::Strings, other) => Err(ShapeError::UnexpectedElement {
                expected: ElementShape::String,
                actual: JsonKind::of(&other),
            }
            .into()),
            (Layout::Objects(_), other) => Err(ShapeError::UnexpectedElement {
                expected: ElementShape::Object,
                actual: JsonKind::of(&other),
            }
            .into()),
        }
    }
}

impl<T, C> Iterator for Singles<'_, T, C>
where
    C: StringCodec<T> + ?Sized,
{
    type Item = Result<T, ConversionError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.advance();
        if matches!(item, Some(Err(_)) | None) {
            self.state = State::Done;
        }
        item
    }
}

impl<T, C> FusedIterator for Singles<'_, T, C> where C: StringCodec<T> + ?Sized {}

/// Converts an array of strings, or an array of objects, into a lazy sequence
/// of values decoded with `codec`.
///
/// `field_name` must be `None` for a string array and `Some` for an object
/// array, where it names the field to decode from each element. An empty
/// array yields nothing whatever `field_name` is.
///
/// Errors are yielded as items; see the module documentation for the
/// validation order.
pub fn convert_singles<'a, T, C>(
    input: Value,
    codec: &'a C,
    field_name: Option<&'a str>,
) -> Singles<'a, T, C>
where
    C: StringCodec<T> + ?Sized,
{
    Singles {
        state: State::Pending(input),
        layout: None,
        field_name,
        codec,
        _marker: PhantomData,
    }
}

/// Drains [`convert_singles`] into a set.
///
/// # Errors
///
/// Returns the first [`ConversionError`] encountered.
pub fn convert_singles_to_set<T, C>(
    input: Value,
    codec: &C,
    field_name: Option<&str>,
) -> Result<HashSet<T>, ConversionError>
where
    T: Eq + Hash,
    C: StringCodec<T> + ?Sized,
{
    convert_singles(input, codec, field_name).collect()
}

// ---------------------------------------------------------------------------
// Pairs
// ---------------------------------------------------------------------------

/// Lazy sequence returned by [`convert_pairs`].
pub struct Pairs<'a, A, B, CA: ?Sized, CB: ?Sized> {
    state: State,
    field_name_1: &'a str,
    field_name_2: &'a str,
    codec_1: &'a CA,
    codec_2: &'a CB,
    _marker: PhantomData<fn() -> (A, B)>,
}

impl<A, B, CA, CB> Pairs<'_, A, B, CA, CB>
where
    CA: StringCodec<A> + ?Sized,
    CB: StringCodec<B> + ?Sized,
{
    fn advance(&mut self) -> Option<Result<(A, B), ConversionError>> {
        if let Err(e) = self.state.start() {
            return Some(Err(e.into()));
        }
        let element = self.state.next_element()?;
        Some(self.convert(&element))
    }

    fn convert(&self, element: &Value) -> Result<(A, B), ConversionError> {
        let Value::Object(fields) = element else {
            return Err(ShapeError::UnexpectedElement {
                expected: ElementShape::Object,
                actual: JsonKind::of(element),
            }
            .into());
        };

        require_key(fields, self.field_name_1)?;
        require_key(fields, self.field_name_2)?;
        let text_1 = string_field(fields, self.field_name_1)?;
        let text_2 = string_field(fields, self.field_name_2)?;

        let value_1 = self.codec_1.decode(text_1)?;
        let value_2 = self.codec_2.decode(text_2)?;
        Ok((value_1, value_2))
    }
}

impl<A, B, CA, CB> Iterator for Pairs<'_, A, B, CA, CB>
where
    CA: StringCodec<A> + ?Sized,
    CB: StringCodec<B> + ?Sized,
{
    type Item = Result<(A, B), ConversionError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.advance();
        if matches!(item, Some(Err(_)) | None) {
            self.state = State::Done;
        }
        item
    }
}

impl<A, B, CA, CB> FusedIterator for Pairs<'_, A, B, CA, CB>
where
    CA: StringCodec<A> + ?Sized,
    CB: StringCodec<B> + ?Sized,
{
}

/// Converts an array of objects into a lazy sequence of pairs.
///
/// Each element must hold string values under both `field_name_1` and
/// `field_name_2`; the pair is ordered by the field names as given here, not
/// by key order in the source JSON. Both fields are checked for presence
/// before either is checked for type. Duplicate pairs are passed through.
pub fn convert_pairs<'a, A, B, CA, CB>(
    input: Value,
    field_name_1: &'a str,
    field_name_2: &'a str,
    codec_1: &'a CA,
    codec_2: &'a CB,
) -> Pairs<'a, A, B, CA, CB>
where
    CA: StringCodec<A> + ?Sized,
    CB: StringCodec<B> + ?Sized,
{
    Pairs {
        state: State::Pending(input),
        field_name_1,
        field_name_2,
        codec_1,
        codec_2,
        _marker: PhantomData,
    }
}

/// Drains [`convert_pairs`] into a set, discarding duplicates.
///
/// # Errors
///
/// Returns the first [`ConversionError`] encountered.
pub fn convert_pairs_to_set<A, B, CA, CB>(
    input: Value,
    field_name_1: &str,
    field_name_2: &str,
    codec_1: &CA,
    codec_2: &CB,
) -> Result<HashSet<(A, B)>, ConversionError>
where
    A: Eq + Hash,
    B: Eq + Hash,
    CA: StringCodec<A> + ?Sized,
    CB: StringCodec<B> + ?Sized,
{
    convert_pairs(input, field_name_1, field_name_2, codec_1, codec_2).collect()
}

// ---------------------------------------------------------------------------
// Booleans
// ---------------------------------------------------------------------------

/// Reads the answer of an access check, which must be a bare JSON boolean.
///
/// # Errors
///
/// Returns [`ShapeError::UnexpectedInput`] for anything other than `true` or
/// `false`.
pub fn convert_boolean(input: &Value) -> Result<bool, ShapeError> {
    input.as_bool().ok_or_else(|| ShapeError::UnexpectedInput {
        expected: InputShape::Boolean,
        actual: JsonKind::of(input),
    })
}
