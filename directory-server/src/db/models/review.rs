//! Review document

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Review document. `shop_id` is always the string-encoded shop reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub shop_id: String,
    /// Expected 1..=5 but not enforced; out-of-range values are accepted
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review: String,
}

impl From<Review> for shared::models::Review {
    fn from(r: Review) -> Self {
        Self {
            id: r.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            shop_id: r.shop_id,
            rating: r.rating,
            review: r.review,
        }
    }
}

/// Validated review insert payload
#[derive(Debug, Clone, Serialize)]
pub struct ReviewInsert {
    pub shop_id: String,
    pub rating: f64,
    pub review: String,
}
