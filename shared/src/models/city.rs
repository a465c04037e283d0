//! City Model

use serde::{Deserialize, Serialize};

/// City entity
///
/// Created implicitly the first time a shop registration names a city not
/// already present; the (city_name, district, pincode, state) tuple is the
/// dedup key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Canonical string id ("city:xxx")
    pub id: String,
    pub city_name: String,
    pub district: String,
    pub pincode: String,
    pub state: String,
}

/// The natural key of a city — all four fields must match exactly for two
/// registrations to share a city record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CityFields {
    pub city_name: String,
    pub district: String,
    pub pincode: String,
    pub state: String,
}
