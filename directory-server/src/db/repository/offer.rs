//! Offer Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::ident;
use crate::db::models::{Offer, OfferCreate};

const TABLE: &str = "offer";

#[derive(Clone)]
pub struct OfferRepository {
    base: BaseRepository,
}

impl OfferRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Offers targeting a shop, newest upload first
    pub async fn find_by_shop(&self, shop_id: &str) -> RepoResult<Vec<Offer>> {
        let sid = shop_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM offer WHERE shop_ids CONTAINS $sid ORDER BY uploaded_at DESC")
            .bind(("sid", sid))
            .await?;
        let offers: Vec<Offer> = result.take(0)?;
        Ok(offers)
    }

    /// Store a new offer
    pub async fn create(&self, data: OfferCreate) -> RepoResult<Offer> {
        let created: Option<Offer> = self.base.db().create(TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create offer".to_string()))
    }

    /// Delete an offer; `false` when it did not exist
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = ident::parse_encoded(id)
            .filter(|rid| rid.table() == TABLE)
            .ok_or_else(|| RepoError::Validation("Invalid offer id".to_string()))?;
        let deleted: Option<Offer> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::OfferMedia;
    use crate::db::test_support::memory_db;

    fn offer_for(shops: &[&str], uploaded_at: i64) -> OfferCreate {
        OfferCreate {
            user_id: "user:u1".into(),
            shop_ids: shops.iter().map(|s| s.to_string()).collect(),
            city_ids: shops.iter().map(|_| Some("city:c1".to_string())).collect(),
            file_base64: "bWVkaWE=".into(),
            file_type: OfferMedia::Image,
            filename: "promo.jpg".into(),
            uploaded_at,
        }
    }

    #[tokio::test]
    async fn find_by_shop_orders_newest_first() {
        let db = memory_db().await;
        let repo = OfferRepository::new(db.clone());
        repo.create(offer_for(&["shop:a"], 1_000)).await.unwrap();
        repo.create(offer_for(&["shop:a", "shop:b"], 2_000))
            .await
            .unwrap();
        repo.create(offer_for(&["shop:b"], 3_000)).await.unwrap();

        let offers = repo.find_by_shop("shop:a").await.unwrap();
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].uploaded_at, 2_000);
        assert_eq!(offers[1].uploaded_at, 1_000);
    }

    #[tokio::test]
    async fn delete_is_idempotent_about_missing_records() {
        let db = memory_db().await;
        let repo = OfferRepository::new(db.clone());
        let offer = repo.create(offer_for(&["shop:a"], 1_000)).await.unwrap();
        let id = offer.id_string();

        assert!(repo.delete(&id).await.unwrap());
        assert!(!repo.delete(&id).await.unwrap());
    }
}
