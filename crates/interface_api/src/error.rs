//! API error handling
//!
//! Business errors keep their stable code in the response body. Store
//! failures and anything unexpected are logged and answered with a generic
//! bad-request message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use domain_motor::InsuranceError;

/// Message returned when the underlying failure must not be echoed
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Insurance(#[from] InsuranceError),

    /// The request could not be read: bad JSON, bad path segment, or a
    /// field failing its shape constraints
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ApiError {
    /// Stable code and HTTP status for this error
    fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Insurance(e) if e.is_not_found() => (StatusCode::NOT_FOUND, e.code()),
            ApiError::Insurance(e) if e.is_business_rule() => (StatusCode::BAD_REQUEST, e.code()),
            ApiError::Insurance(_) => (StatusCode::BAD_REQUEST, "unknown.error"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "invalid.request"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();

        let message = match &self {
            ApiError::Insurance(e) if e.is_not_found() || e.is_business_rule() => e.to_string(),
            ApiError::Insurance(e) => {
                error!(error = %e, "Request failed with an unexpected error");
                UNKNOWN_ERROR_MESSAGE.to_string()
            }
            ApiError::BadRequest(msg) => {
                warn!(reason = %msg, "Rejected malformed request");
                msg.clone()
            }
        };

        let body = ErrorResponse {
            error: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::BadRequest(errors.to_string())
    }
}
