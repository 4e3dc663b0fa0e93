//! API error types with structured JSON responses.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing required patient information: {0}")]
    MissingField(&'static str),
    #[error("No files provided")]
    NoFiles,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "MISSING_FIELD",
                    message: format!("Missing required patient information: {field}"),
                    field: Some(field),
                    details: None,
                },
            ),
            ApiError::NoFiles => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "NO_FILES",
                    message: "No files provided".to_string(),
                    field: None,
                    details: None,
                },
            ),
            ApiError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "BAD_REQUEST",
                    message: detail,
                    field: None,
                    details: None,
                },
            ),
            ApiError::PayloadTooLarge(detail) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorDetail {
                    code: "PAYLOAD_TOO_LARGE",
                    message: detail,
                    field: None,
                    details: None,
                },
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorDetail {
                        code: "INTERNAL",
                        message: "Failed to generate summary".to_string(),
                        field: None,
                        details: Some(detail),
                    },
                )
            }
        };

        (status, Json(ErrorBody { error: detail })).into_response()
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(err.body_text())
        } else {
            ApiError::BadRequest(err.body_text())
        }
    }
}
