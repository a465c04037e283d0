//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity — immutable reference data, looked up, never created
/// through the public API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Canonical string id ("category:xxx")
    pub id: String,
    pub name: String,
}
