//! User Repository

use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::User;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a user with an already-hashed password.
    ///
    /// The unique index on `email` backs the earlier existence check, so
    /// a concurrent duplicate registration fails here instead of creating
    /// a second account.
    pub async fn create(&self, email: &str, password_digest: &str) -> RepoResult<User> {
        if self.find_by_email(email).await?.is_some() {
            return Err(RepoError::Duplicate("Email already exists".to_string()));
        }
        let created: Option<User> = self
            .base
            .db()
            .create(TABLE)
            .content(json!({ "email": email, "password": password_digest }))
            .await
            .map_err(|e| match e {
                // Unique index violation from the racing writer
                e if e.to_string().contains("user_email") => {
                    RepoError::Duplicate("Email already exists".to_string())
                }
                e => RepoError::from(e),
            })?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }
}
