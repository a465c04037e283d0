//! API Response types
//!
//! Standardized response envelope used by every handler.

use serde::{Deserialize, Serialize};

/// Outcome flag carried by every response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Unified API response structure
///
/// All responses follow this format:
/// ```json
/// {
///     "status": "success",
///     "message": "Shop added",
///     "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: Status,
    /// Human-readable message (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            status: Status::Success,
            message: None,
            data: Some(data),
        }
    }

    /// Create a successful response with a message and data
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Create a successful response carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
            data: None,
        }
    }
}
