//! Core services
//!
//! Read-side logic above the repositories: fuzzy multi-field search and
//! denormalized view assembly. Neither holds state — the store is the
//! sole source of truth.

pub mod search;
pub mod views;

pub use search::SearchService;
pub use views::ViewService;
