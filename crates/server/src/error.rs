// crates/server/src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mediadrop_core::StorageError;
use serde::Serialize;
use thiserror::Error;

use crate::jobs::JobConflict;

/// Structured JSON error response for API errors
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// API error types that map to HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error(transparent)]
    JobConflict(#[from] JobConflict),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            ApiError::FileNotFound(name) => {
                tracing::warn!(file = %name, "File not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::with_details("File not found", format!("Filename: {}", name)),
                )
            }
            ApiError::JobNotFound(key) => {
                tracing::warn!(job = %key, "Job not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::with_details("Job not found", format!("Job key: {}", key)),
                )
            }
            ApiError::JobConflict(conflict) => {
                tracing::warn!(job = %conflict.key, "Job already running");
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::with_details("Job already running", conflict.to_string()),
                )
            }
            ApiError::Storage(storage_err) => match storage_err {
                StorageError::NotFound { name } => {
                    tracing::warn!(file = %name, "Blob not found");
                    (
                        StatusCode::NOT_FOUND,
                        ErrorResponse::with_details(
                            "File not found",
                            format!("Filename: {}", name),
                        ),
                    )
                }
                StorageError::Io { path, source } => {
                    tracing::error!(path = %path.display(), error = %source, "Storage IO error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorResponse::with_details("Storage error", storage_err.to_string()),
                    )
                }
            },
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
