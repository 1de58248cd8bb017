//! Error types for the function client.
//!
//! # Design
//! `NotFound` is split out because a missing route usually means the caller
//! is pointed at the wrong base URL or prefix. Any other unexpected status
//! lands in `HttpError` together with the status the route should have
//! answered with.

use std::fmt;

/// Errors returned by `FunctionClient` build and parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404; the route is not mounted at this base URL.
    NotFound,

    /// The server returned a status other than the one the route promises.
    HttpError {
        expected: u16,
        status: u16,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),

    /// A header the route always sets was absent.
    MissingHeader(String),

    /// The response carried a content type where none was expected.
    UnexpectedContentType(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "route not found"),
            ApiError::HttpError {
                expected,
                status,
                body,
            } => {
                write!(f, "HTTP {status} (expected {expected}): {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::MissingHeader(name) => write!(f, "missing response header `{name}`"),
            ApiError::UnexpectedContentType(value) => {
                write!(f, "unexpected content type {value:?}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
