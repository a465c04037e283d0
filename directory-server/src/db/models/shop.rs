//! Shop document

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use crate::db::ident::EntityRef;

/// Shop document as stored.
///
/// Both `name` and `shop_name` may be present and are used
/// interchangeably by the data. `category` entries may be native ids,
/// string-encoded ids or bare category names; `city_id` may be either id
/// representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    /// Ordered category references, mixed representations
    #[serde(default)]
    pub category: Vec<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_id: Option<EntityRef>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Base64-encoded image payloads
    #[serde(default)]
    pub photos: Vec<String>,
    /// Owning user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<EntityRef>,
}

impl Shop {
    /// Canonical string id, empty when not yet stored
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }

    /// Display name: prefer `shop_name`, fall back to `name`, then ""
    pub fn display_name(&self) -> String {
        self.shop_name
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_default()
    }
}

/// New shop payload, after category names have been resolved to ids and
/// the city has been found or created.
#[derive(Debug, Clone, Serialize)]
pub struct ShopCreate {
    pub shop_name: String,
    pub description: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub landmark: String,
    /// Canonical category id strings
    pub category: Vec<String>,
    /// Canonical city id string
    pub city_id: String,
    pub photos: Vec<String>,
    pub keywords: Vec<String>,
    /// Canonical owner id string
    pub user_id: String,
}

/// Partial shop update; `None` fields are left untouched. Form-sourced
/// empty strings also count as "not provided" and never blank a stored
/// value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShopUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl ShopUpdate {
    /// Drop empty-string fields so they merge as absent, not as blanks
    pub fn without_empty_fields(mut self) -> Self {
        fn drop_empty(field: &mut Option<String>) {
            if field.as_deref() == Some("") {
                *field = None;
            }
        }
        drop_empty(&mut self.shop_name);
        drop_empty(&mut self.description);
        drop_empty(&mut self.address);
        drop_empty(&mut self.phone_number);
        drop_empty(&mut self.email);
        drop_empty(&mut self.landmark);
        drop_empty(&mut self.city_id);
        self
    }
}
