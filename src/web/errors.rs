//! # Web API Error Types
//!
//! HTTP error responses for the telemetry endpoints. Built on thiserror, with Axum's
//! `IntoResponse` producing a `{"error": {"code", "message", ...}}` body.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::services::StatusError;
use crate::validation::FieldError;

/// Seconds a client should wait before retrying a read that raced a write
pub const SNAPSHOT_RETRY_AFTER_SECONDS: u64 = 1;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    #[error("Robot data is missing field '{field}'")]
    KeyMissing { field: String },

    #[error("Robot data failed validation")]
    Validation { details: Vec<FieldError> },

    /// Snapshot exists but could not be parsed; includes Retry-After header
    #[error("Robot data temporarily unreadable: {reason}")]
    SnapshotUnavailable {
        reason: String,
        retry_after_seconds: u64,
    },

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } | ApiError::KeyMissing { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::SnapshotUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::KeyMissing { .. } => "KEY_MISSING",
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::SnapshotUnavailable { .. } => "SNAPSHOT_UNREADABLE",
            ApiError::Internal => "INTERNAL_ERROR",
        }
    }
}

impl From<StatusError> for ApiError {
    fn from(err: StatusError) -> Self {
        match err {
            StatusError::NotFound => ApiError::not_found("Robot data not found"),
            StatusError::KeyMissing { field } => ApiError::KeyMissing { field },
            StatusError::Validation { details } => ApiError::Validation { details },
            StatusError::Parse { reason } => ApiError::SnapshotUnavailable {
                reason,
                retry_after_seconds: SNAPSHOT_RETRY_AFTER_SECONDS,
            },
            StatusError::Io { reason } => {
                error!(%reason, "Robot data could not be read");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let code = self.error_code();

        match self {
            ApiError::SnapshotUnavailable {
                reason,
                retry_after_seconds,
            } => {
                let body = json!({
                    "error": {
                        "code": code,
                        "message": "Robot data is being updated or is malformed; retry the request",
                        "reason": reason,
                        "retry_after_seconds": retry_after_seconds
                    }
                });
                (
                    status_code,
                    [(header::RETRY_AFTER, retry_after_seconds.to_string())],
                    Json(body),
                )
                    .into_response()
            }

            ApiError::Validation { details } => {
                let body = json!({
                    "error": {
                        "code": code,
                        "message": "Robot data does not match the status schema",
                        "details": details
                    }
                });
                (status_code, Json(body)).into_response()
            }

            ApiError::KeyMissing { field } => {
                let body = json!({
                    "error": {
                        "code": code,
                        "message": format!("Robot data is missing field '{field}'"),
                        "field": field
                    }
                });
                (status_code, Json(body)).into_response()
            }

            ApiError::NotFound { message } => {
                let body = json!({
                    "error": {
                        "code": code,
                        "message": message
                    }
                });
                (status_code, Json(body)).into_response()
            }

            ApiError::Internal => {
                let body = json!({
                    "error": {
                        "code": code,
                        "message": "Internal server error"
                    }
                });
                (status_code, Json(body)).into_response()
            }
        }
    }
}
