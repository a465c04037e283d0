//! User (shop owner) document

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// User document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub email: String,
    /// SHA-256 hex digest of the password
    pub password: String,
}

impl User {
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }
}
