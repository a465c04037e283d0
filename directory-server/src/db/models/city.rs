//! City document

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use surrealdb::RecordId;

use super::serde_helpers;

pub use shared::models::CityFields;

/// City document, deduplicated on the (city_name, district, pincode, state)
/// tuple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub city_name: String,
    pub district: String,
    pub pincode: String,
    pub state: String,
}

impl City {
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }
}

impl From<City> for shared::models::City {
    fn from(c: City) -> Self {
        let id = c.id_string();
        Self {
            id,
            city_name: c.city_name,
            district: c.district,
            pincode: c.pincode,
            state: c.state,
        }
    }
}

/// Deterministic record key for a city's natural 4-tuple.
///
/// Using the key as the record id makes `find_or_create` a single atomic
/// upsert: concurrent registrations of the same city land on the same
/// record instead of racing a check-then-insert.
pub fn city_record_key(fields: &CityFields) -> String {
    let mut hasher = Sha256::new();
    for part in [
        &fields.city_name,
        &fields.district,
        &fields.pincode,
        &fields.state,
    ] {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    hex::encode(&hasher.finalize()[..12])
}
