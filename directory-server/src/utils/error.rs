//! Unified error handling
//!
//! [`AppError`] is the only error type handlers return. Business failures
//! (bad input, missing resource) render as the error envelope with HTTP
//! 200, matching the upstream contract the clients were built against;
//! store failures render as 500. No store error escapes unhandled, and
//! resolution misses are not errors at all — they are handled by omission
//! in the view layer.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::ApiResponse;
use tracing::error;

use crate::db::repository::RepoError;

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing caller input
    #[error("{0}")]
    Validation(String),

    /// A required resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Store-operation failure (connectivity, constraint violation)
    #[error("Database error: {0}")]
    Database(String),

    /// Anything else
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        AppError::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) | RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) | AppError::NotFound(msg) => {
                (StatusCode::OK, msg.clone())
            }
            AppError::Database(msg) => {
                error!("Database error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

/// Result type for handler operations
pub type AppResult<T> = Result<T, AppError>;
