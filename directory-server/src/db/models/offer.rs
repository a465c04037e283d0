//! Promotional offer document

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Offer media type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferMedia {
    Image,
    Video,
}

impl OfferMedia {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferMedia::Image => "image",
            OfferMedia::Video => "video",
        }
    }
}

/// Offer document. One offer may target several shops (e.g. "all shops
/// owned by a user"), so `shop_ids` is a sequence of string-encoded shop
/// references with `city_ids` aligned to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub user_id: String,
    #[serde(default)]
    pub shop_ids: Vec<String>,
    #[serde(default)]
    pub city_ids: Vec<Option<String>>,
    /// Base64 media payload; offers missing it are skipped in views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_base64: Option<String>,
    #[serde(default = "default_media")]
    pub file_type: OfferMedia,
    #[serde(default)]
    pub filename: String,
    /// Upload time, UTC milliseconds
    pub uploaded_at: i64,
}

fn default_media() -> OfferMedia {
    OfferMedia::Image
}

impl Offer {
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }
}

/// New offer payload
#[derive(Debug, Clone, Serialize)]
pub struct OfferCreate {
    pub user_id: String,
    pub shop_ids: Vec<String>,
    pub city_ids: Vec<Option<String>>,
    pub file_base64: String,
    pub file_type: OfferMedia,
    pub filename: String,
    pub uploaded_at: i64,
}
