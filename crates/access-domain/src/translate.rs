//! Translation of non-success HTTP responses into [`AccessManagerError`]s.
//!
//! Translation runs in two stages:
//!
//! 1. **Decode** the body into an [`ErrorResponse`]. A body which is not JSON,
//!    has no `error` object, or lacks `code`/`message` is *undecodable*. An
//!    undecodable body is never an error of its own.
//! 2. **Dispatch** on the status code (and, for 404, on the error code).
//!
//! | Status | Decodable body | Result |
//! |--------|----------------|--------|
//! | 500 | yes | `GenericServer` with the error message |
//! | 400 | yes | `Validation` with the error message |
//! | 404 | yes | `ElementNotFound` for the four element codes, otherwise `NotFound` |
//! | other | yes | `GenericServer` naming method, URL, status, code and message |
//! | any | no | `GenericServer` naming method, URL, status and the raw body |
//!
//! Translation is pure and synchronous; nothing is retried.

use tracing::warn;

use crate::error_response::ErrorResponse;
use crate::errors::{AccessManagerError, ElementType};
use crate::transport::HttpMethod;

const BAD_REQUEST: u16 = 400;
const NOT_FOUND: u16 = 404;
const INTERNAL_SERVER_ERROR: u16 = 500;

const RESOURCE_ID_ATTRIBUTE: &str = "ResourceId";

/// Maps the `code` of a 404 error body to the element type it reports.
fn element_type_for_code(code: &str) -> Option<ElementType> {
    match code {
        "UserNotFoundException" => Some(ElementType::User),
        "GroupNotFoundException" => Some(ElementType::Group),
        "EntityTypeNotFoundException" => Some(ElementType::EntityType),
        "EntityNotFoundException" => Some(ElementType::Entity),
        _ => None,
    }
}

/// Attempts to decode a response body as a structured error.
///
/// Returns `None` for any undecodable body.
pub fn try_decode_error_body(body: &str) -> Option<ErrorResponse> {
    match ErrorResponse::from_json_str(body) {
        Ok(response) => Some(response),
        Err(e) => {
            warn!(error = %e, "response body is not a structured error");
            None
        }
    }
}

/// Converts a non-success response into the matching [`AccessManagerError`].
///
/// `method` and `url` identify the request in the generic messages.
pub fn translate_error(status: u16, body: &str, method: HttpMethod, url: &str) -> AccessManagerError {
    match try_decode_error_body(body) {
        Some(response) => translate_error_response(status, response, method, url),
        None => AccessManagerError::GenericServer {
            message: undecodable_message(status, body, method, url),
            status,
            error_response: None,
        },
    }
}

/// Dispatches an already-decoded error body on `status`.
pub fn translate_error_response(
    status: u16,
    response: ErrorResponse,
    method: HttpMethod,
    url: &str,
) -> AccessManagerError {
    match status {
        INTERNAL_SERVER_ERROR => AccessManagerError::GenericServer {
            message: response.message().to_owned(),
            status,
            error_response: Some(Box::new(response)),
        },
        BAD_REQUEST => AccessManagerError::Validation {
            message: response.message().to_owned(),
            error_response: Box::new(response),
        },
        NOT_FOUND => not_found(response),
        _ => AccessManagerError::GenericServer {
            message: format!(
                "{}, error code '{}', and error message '{}'.",
                base_message(status, method, url),
                response.code(),
                response.message()
            ),
            status,
            error_response: Some(Box::new(response)),
        },
    }
}

fn not_found(response: ErrorResponse) -> AccessManagerError {
    let message = response.message().to_owned();
    match element_type_for_code(response.code()) {
        Some(element_type) => AccessManagerError::ElementNotFound {
            message,
            element_type,
            element_value: response.attribute(element_type.as_str()).to_owned(),
            error_response: Box::new(response),
        },
        None => AccessManagerError::NotFound {
            message,
            resource_id: response.attribute(RESOURCE_ID_ATTRIBUTE).to_owned(),
            error_response: Box::new(response),
        },
    }
}

fn base_message(status: u16, method: HttpMethod, url: &str) -> String {
    format!(
        "Failed to call URL '{url}' with '{method}' method. Received non-success HTTP response status '{status}'"
    )
}

fn undecodable_message(status: u16, body: &str, method: HttpMethod, url: &str) -> String {
    let base = base_message(status, method, url);
    if body.trim().is_empty() {
        format!("{base}.")
    } else {
        format!("{base} and response body '{body}'.")
    }
}
