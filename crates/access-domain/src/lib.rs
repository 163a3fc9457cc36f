//! Domain layer of the access manager client.
//!
//! Everything needed to turn access manager HTTP responses into typed values
//! and typed failures lives here: string codecs for caller-defined element
//! types, the response shape converter, the structured error body model, and
//! the status-to-error translator. The HTTP transport and the operations
//! themselves are port traits; `access-client` implements them.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! Every function here is synchronous and stateless, so all of it is safe to
//! call concurrently as long as the supplied codecs are.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`codec`] | `StringCodec` contract and the built-in codecs |
//! | [`shape`] | JSON shape vocabulary, `ShapeError`, `ConversionError` |
//! | [`convert`] | Lazy list and pair conversion, boolean answers |
//! | [`error_response`] | `ErrorResponse` model and its lenient deserializer |
//! | [`translate`] | Status and error body to `AccessManagerError` |
//! | [`errors`] | Caller-facing `AccessManagerError` taxonomy |
//! | [`transport`] | `HttpTransport` port |
//! | [`processor`] | Event and query processor ports |

pub mod codec;
pub mod convert;
pub mod error_response;
pub mod errors;
pub mod processor;
pub mod shape;
pub mod translate;
pub mod transport;

pub use codec::{DecodeError, DisplayCodec, FnCodec, IdentityCodec, StringCodec};
pub use convert::{
    convert_boolean, convert_pairs, convert_pairs_to_set, convert_singles, convert_singles_to_set,
    Pairs, Singles,
};
pub use error_response::{DeserializationError, ErrorAttribute, ErrorResponse};
pub use errors::{AccessManagerError, ElementType};
pub use processor::{
    AccessManagerEventProcessor, AccessManagerQueryProcessor, AccessResult, Element,
};
pub use shape::{ConversionError, ElementShape, InputShape, JsonKind, ShapeError};
pub use translate::{translate_error, translate_error_response, try_decode_error_body};
pub use transport::{HttpMethod, HttpResponse, HttpTransport, TransportFailure};
