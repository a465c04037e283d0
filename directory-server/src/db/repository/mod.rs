//! Repository Module
//!
//! Entity lookup and mutation over the document store. Every resolution
//! helper follows the same contract: malformed identifiers never raise,
//! they simply fail to match, and a lookup returning `None` is a normal
//! outcome handled by omission at the view layer.

pub mod category;
pub mod city;
pub mod offer;
pub mod review;
pub mod shop;
pub mod user;

// Re-exports
pub use category::CategoryRepository;
pub use city::CityRepository;
pub use offer::OfferRepository;
pub use review::ReviewRepository;
pub use shop::ShopRepository;
pub use user::UserRepository;

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use super::ident::EntityRef;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// The record id a reference points at, but only if it targets the
    /// given table. A "city:x" reference resolved against the category
    /// table is a miss, not a cross-table read.
    pub fn record_id_in(&self, reference: &EntityRef, table: &str) -> Option<RecordId> {
        reference.record_id().filter(|id| id.table() == table)
    }
}
