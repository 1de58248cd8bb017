//! Error responses for the function routes.
//!
//! Every failure is rendered as a JSON envelope `{"error": CODE, "message": ..}`
//! so callers can tell a rejected payload apart from a transform result.

use std::fmt;

use axum::extract::rejection::{JsonRejection, QueryRejection, StringRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionError {
    /// A required query parameter was absent.
    MissingQueryParam(&'static str),

    /// The body could not be read as the payload the route expects.
    InvalidPayload(String),

    /// A JSON route was called without a JSON content type.
    UnsupportedMediaType,

    /// The body exceeded the request body limit.
    PayloadTooLarge,

    /// The transform would leave the 32-bit integer range.
    Overflow,
}

impl FunctionError {
    pub fn status(&self) -> StatusCode {
        match self {
            FunctionError::MissingQueryParam(_) | FunctionError::InvalidPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            FunctionError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            FunctionError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            FunctionError::Overflow => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            FunctionError::MissingQueryParam(_) => "BAD_REQUEST",
            FunctionError::InvalidPayload(_) => "VALIDATION_ERROR",
            FunctionError::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            FunctionError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            FunctionError::Overflow => "ARITHMETIC_OVERFLOW",
        }
    }
}

impl fmt::Display for FunctionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionError::MissingQueryParam(name) => {
                write!(f, "missing query parameter `{name}`")
            }
            FunctionError::InvalidPayload(reason) => write!(f, "invalid payload: {reason}"),
            FunctionError::UnsupportedMediaType => {
                write!(f, "expected request with `Content-Type: application/json`")
            }
            FunctionError::PayloadTooLarge => write!(f, "request body is too large"),
            FunctionError::Overflow => write!(f, "result does not fit in a 32-bit integer"),
        }
    }
}

impl std::error::Error for FunctionError {}

impl From<JsonRejection> for FunctionError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => FunctionError::UnsupportedMediaType,
            other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                FunctionError::PayloadTooLarge
            }
            other => FunctionError::InvalidPayload(other.body_text()),
        }
    }
}

impl From<StringRejection> for FunctionError {
    fn from(rejection: StringRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            FunctionError::PayloadTooLarge
        } else {
            FunctionError::InvalidPayload(rejection.body_text())
        }
    }
}

impl From<QueryRejection> for FunctionError {
    fn from(rejection: QueryRejection) -> Self {
        FunctionError::InvalidPayload(rejection.body_text())
    }
}

impl IntoResponse for FunctionError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, status = self.status().as_u16(), "Rejecting request");
        (
            self.status(),
            Json(json!({
                "error": self.code(),
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}
