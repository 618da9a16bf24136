//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::object_store::StorageError;

/// Error body shape returned by every failing endpoint
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErrorDetail {
    /// Human-readable description of the failure
    pub detail: String,
}

/// Application error carrying an HTTP status and a `detail` body
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    detail: String,
}

impl AppError {
    /// Creates an error with an explicit status
    #[must_use]
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// Maps a storage outcome into the HTTP contract.
    ///
    /// A missing blob becomes 404 carrying the storage error's own message;
    /// everything else becomes 500 with the action phrase prepended.
    #[must_use]
    pub fn from_storage(err: StorageError, action: &str) -> Self {
        match err {
            StorageError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            StorageError::Provider(message) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to {action}: {message}"),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error: {}", self.detail),
            500..=599 => tracing::error!("Server error: {}", self.detail),
            _ => {}
        }

        (self.status, Json(ErrorDetail { detail: self.detail })).into_response()
    }
}

impl OperationOutput for AppError {
    type Inner = ErrorDetail;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ErrorDetail>::operation_response(ctx, operation)
    }
}
