//! City Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::ident::EntityRef;
use crate::db::models::{City, CityFields, city_record_key};

const TABLE: &str = "city";

/// Cap on city suggestions returned to autocomplete callers
const SEARCH_LIMIT: usize = 20;

#[derive(Clone)]
pub struct CityRepository {
    base: BaseRepository,
}

impl CityRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Resolve a city reference. Cities have no name fallback: only the
    /// two id representations match.
    pub async fn resolve(&self, reference: &EntityRef) -> RepoResult<Option<City>> {
        match self.base.record_id_in(reference, TABLE) {
            Some(rid) => Ok(self.base.db().select(rid).await?),
            None => Ok(None),
        }
    }

    /// Find the city with this exact 4-tuple, creating it if absent, and
    /// return its canonical id string.
    ///
    /// The record key is derived deterministically from the tuple, so the
    /// whole operation is a single atomic upsert: two concurrent
    /// registrations of the same new city converge on one record.
    pub async fn find_or_create(&self, fields: &CityFields) -> RepoResult<String> {
        let key = city_record_key(fields);
        let city = City {
            id: None,
            city_name: fields.city_name.clone(),
            district: fields.district.clone(),
            pincode: fields.pincode.clone(),
            state: fields.state.clone(),
        };
        let stored: Option<City> = self
            .base
            .db()
            .upsert((TABLE, key.as_str()))
            .content(city)
            .await?;
        stored
            .map(|c| c.id_string())
            .ok_or_else(|| RepoError::Database("Failed to upsert city".to_string()))
    }

    /// Case-insensitive substring search on `city_name`
    pub async fn search_text(&self, query: &str) -> RepoResult<Vec<City>> {
        let needle = query.to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM city WHERE string::contains(string::lowercase(city_name), $needle) LIMIT $limit")
            .bind(("needle", needle))
            .bind(("limit", SEARCH_LIMIT))
            .await?;
        let cities: Vec<City> = result.take(0)?;
        Ok(cities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_db;

    fn springfield() -> CityFields {
        CityFields {
            city_name: "Springfield".into(),
            district: "Central".into(),
            pincode: "400001".into(),
            state: "IL".into(),
        }
    }

    #[tokio::test]
    async fn find_or_create_dedups_on_the_full_tuple() {
        let db = memory_db().await;
        let repo = CityRepository::new(db.clone());

        let first = repo.find_or_create(&springfield()).await.unwrap();
        let second = repo.find_or_create(&springfield()).await.unwrap();
        assert_eq!(first, second);

        let mut other = springfield();
        other.pincode = "400002".into();
        let third = repo.find_or_create(&other).await.unwrap();
        assert_ne!(first, third);

        let cities: Vec<City> = db.select(TABLE).await.unwrap();
        assert_eq!(cities.len(), 2);
    }

    #[tokio::test]
    async fn concurrent_find_or_create_yields_one_record() {
        let db = memory_db().await;
        let repo = CityRepository::new(db.clone());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.find_or_create(&springfield()).await })
            })
            .collect();
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);

        let cities: Vec<City> = db.select(TABLE).await.unwrap();
        assert_eq!(cities.len(), 1);
    }

    #[tokio::test]
    async fn resolve_matches_both_representations_but_not_names() {
        let db = memory_db().await;
        let repo = CityRepository::new(db.clone());
        let id = repo.find_or_create(&springfield()).await.unwrap();

        let by_encoded = repo.resolve(&EntityRef::from_text(id.clone())).await.unwrap();
        assert_eq!(by_encoded.unwrap().city_name, "Springfield");

        let by_name = repo
            .resolve(&EntityRef::from_text("Springfield"))
            .await
            .unwrap();
        assert!(by_name.is_none());
    }

    #[tokio::test]
    async fn malformed_reference_is_a_miss_not_an_error() {
        let db = memory_db().await;
        let repo = CityRepository::new(db.clone());
        let miss = repo
            .resolve(&EntityRef::from_text("not-a-city-id"))
            .await
            .unwrap();
        assert!(miss.is_none());
    }
}
