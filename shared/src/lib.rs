//! Shared types for the directory service
//!
//! Common types used by the server and API consumers: entity models,
//! denormalized view structures and the response envelope.

pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use response::ApiResponse;
