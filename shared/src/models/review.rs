//! Review Model

use serde::{Deserialize, Serialize};

/// Review entity — append-only, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Canonical string id ("review:xxx")
    pub id: String,
    /// String-encoded shop reference ("shop:xxx")
    pub shop_id: String,
    /// Star rating; range is not enforced, out-of-range values are accepted
    pub rating: f64,
    pub review: String,
}

/// Review submission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub shop_id: Option<String>,
    pub rating: Option<f64>,
    pub review: Option<String>,
}
