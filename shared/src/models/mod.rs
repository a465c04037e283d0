//! Data models
//!
//! API-facing entity types shared between the server and its clients.
//! All identifiers are carried in their canonical string form — the
//! server never exposes a native record id.

pub mod category;
pub mod city;
pub mod review;
pub mod user;
pub mod views;

// Re-exports
pub use category::*;
pub use city::*;
pub use review::*;
pub use user::*;
pub use views::*;
