//! Database models
//!
//! Document types as stored in SurrealDB. Reference fields use
//! [`EntityRef`](crate::db::ident::EntityRef) because the legacy data
//! mixes native record ids, string encodings and (for categories) bare
//! names in the same field. Conversions into the API types in `shared`
//! canonicalize every identifier.

pub mod serde_helpers;

pub mod category;
pub mod city;
pub mod offer;
pub mod review;
pub mod shop;
pub mod user;

// Re-exports
pub use category::*;
pub use city::*;
pub use offer::*;
pub use review::*;
pub use shop::*;
pub use user::*;
