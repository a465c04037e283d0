//! Server state
//!
//! [`ServerState`] holds the shared handles every handler needs: the
//! configuration and the embedded database. Requests are handled
//! independently — there is no cross-request coordination, the store is
//! the only shared resource.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::services::{SearchService, ViewService};
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
}

impl ServerState {
    /// Open the database and build the state
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;
        let db_service = DbService::new(&config.work_dir).await?;
        Ok(Self {
            config: config.clone(),
            db: db_service.db,
        })
    }

    /// State backed by an existing database handle (tests, tooling)
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        Self { config, db }
    }

    pub fn search_service(&self) -> SearchService {
        SearchService::new(self.db.clone())
    }

    pub fn view_service(&self) -> ViewService {
        ViewService::new(self.db.clone())
    }
}
