//! Denormalized view structures
//!
//! Read-only aggregations assembled by joining shop, category, city,
//! review and offer records. Joins are resolve-or-omit: a reference that
//! does not resolve is dropped or rendered as null, never an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::category::Category;
use super::city::City;

/// Aggregate derived from a shop's review set.
///
/// A shop with no reviews reports `avg_rating: 0.0, reviews_count: 0` —
/// this is the "no reviews yet" convention, not missing data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Arithmetic mean of ratings, rounded to one decimal place
    pub avg_rating: f64,
    pub reviews_count: usize,
}

/// A single representative photo, wrapped with a fixed content-type tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// Base64-encoded image payload
    pub data: String,
    pub content_type: String,
}

/// Search / listing result for one shop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopSearchResult {
    /// The normalized shop document (all record ids canonicalized)
    pub shop: Value,
    /// Resolved categories; non-matching references are silently omitted,
    /// so this may be shorter than the shop's category reference list
    pub categories: Vec<Category>,
    pub city: Option<City>,
    pub photo: Option<Photo>,
    /// Display name: `shop_name`, falling back to `name`, then ""
    pub shop_name: String,
    pub avg_rating: f64,
    pub reviews_count: usize,
}

/// Owner-facing listing for one shop, with promotional offers joined in.
///
/// `offers`, `offer_types` and `offer_ids` are index-aligned: position *i*
/// in each vector refers to the same offer, newest upload first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerShopView {
    pub shop: Value,
    pub categories: Vec<Category>,
    pub city: Option<City>,
    /// Base64 media payloads, newest first
    pub offers: Vec<String>,
    /// "image" | "video", aligned with `offers`
    pub offer_types: Vec<String>,
    /// Canonical offer ids, aligned with `offers`
    pub offer_ids: Vec<String>,
}
