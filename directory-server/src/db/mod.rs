//! Database Module
//!
//! Embedded SurrealDB storage. Tables are schemaless because the legacy
//! data carries mixed-representation reference fields; the only declared
//! constraint is the unique index on `user.email`.

pub mod ident;
pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "directory";
const DATABASE: &str = "directory";

/// Table and index definitions, applied on every startup (idempotent).
const SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS user_email ON user FIELDS email UNIQUE;
    DEFINE TABLE IF NOT EXISTS shop SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS category SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS city SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS review SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS offer SCHEMALESS;
";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database under `data_dir`
    pub async fn new(data_dir: &str) -> Result<Self, AppError> {
        let path = Path::new(data_dir).join("directory.db");
        let db: Surreal<Db> = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select database: {e}")))?;

        define_schema(&db)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        tracing::info!("Database connection established (SurrealDB embedded)");
        Ok(Self { db })
    }
}

/// Apply table and index definitions
pub async fn define_schema(db: &Surreal<Db>) -> Result<(), surrealdb::Error> {
    db.query(SCHEMA).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Category;
    use serde_json::json;

    #[tokio::test]
    async fn on_disk_store_round_trips_a_record() {
        let dir = tempfile::tempdir().unwrap();
        let service = DbService::new(dir.path().to_str().unwrap()).await.unwrap();

        let _: Option<Category> = service
            .db
            .create(("category", "c1"))
            .content(json!({ "name": "Bakery" }))
            .await
            .unwrap();
        let found: Option<Category> = service.db.select(("category", "c1")).await.unwrap();
        assert_eq!(found.unwrap().name, "Bakery");
    }

    #[tokio::test]
    async fn unique_email_index_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let service = DbService::new(dir.path().to_str().unwrap()).await.unwrap();

        let _: Option<crate::db::models::User> = service
            .db
            .create("user")
            .content(json!({ "email": "a@example.com", "password": "x" }))
            .await
            .unwrap();
        let second: Result<Option<crate::db::models::User>, _> = service
            .db
            .create("user")
            .content(json!({ "email": "a@example.com", "password": "y" }))
            .await;
        assert!(second.is_err());
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use surrealdb::Surreal;
    use surrealdb::engine::local::{Db, Mem};

    /// In-memory database with the schema applied, one per test
    pub async fn memory_db() -> Surreal<Db> {
        let db: Surreal<Db> = Surreal::new::<Mem>(()).await.unwrap();
        db.use_ns("test").use_db("test").await.unwrap();
        super::define_schema(&db).await.unwrap();
        db
    }
}
