//! API error handling.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use veil_core::error::VeilError;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: code.into(),
        }
    }

    /// Internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "INTERNAL_ERROR")
    }

    /// Returns the HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the machine-readable code.
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<VeilError> for ApiError {
    fn from(err: VeilError) -> Self {
        let (status, code) = match &err {
            VeilError::InvalidEncoding(_) => (StatusCode::BAD_REQUEST, "INVALID_ENCODING"),
            VeilError::InvalidMetaAddress(_) => (StatusCode::BAD_REQUEST, "INVALID_META_ADDRESS"),
            VeilError::InvalidAmount(_) => (StatusCode::BAD_REQUEST, "INVALID_AMOUNT"),
            VeilError::MissingParameters(_) => (StatusCode::BAD_REQUEST, "MISSING_PARAMETERS"),
            VeilError::UnknownAnnouncement(_) => (StatusCode::NOT_FOUND, "UNKNOWN_ANNOUNCEMENT"),
            VeilError::NotRegistered(_) => (StatusCode::NOT_FOUND, "NOT_REGISTERED"),
            _ => {
                tracing::error!(error = %err, "Internal error");
                return ApiError::internal("An internal error occurred");
            }
        };
        ApiError::new(status, err.to_string(), code)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let code = match rejection {
            // No JSON body at all reads as an empty request
            JsonRejection::MissingJsonContentType(_) => "MISSING_PARAMETERS",
            _ => "INVALID_ENCODING",
        };
        ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text(), code)
    }
}
