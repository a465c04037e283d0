//! Category document

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Category document. `name` is unique by convention, not enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
}

impl Category {
    /// Canonical string id, empty when the document has not been stored yet
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }
}

impl From<Category> for shared::models::Category {
    fn from(c: Category) -> Self {
        let id = c.id_string();
        Self { id, name: c.name }
    }
}
