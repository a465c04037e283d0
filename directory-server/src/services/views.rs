//! View assembly
//!
//! Joins a shop with its categories, city, reviews, photos and offers
//! into the denormalized structures returned to clients. All joins are
//! resolve-or-omit: a dangling reference drops out of the result instead
//! of failing the request.

use shared::models::{Category, City, OwnerShopView, Photo, ShopSearchResult};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::ident;
use crate::db::models::Shop;
use crate::db::repository::{
    CategoryRepository, CityRepository, OfferRepository, RepoResult, ReviewRepository,
};

/// Content type tag for the representative photo. Uploads are accepted in
/// several formats but the listing clients render everything as JPEG.
const PHOTO_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Clone)]
pub struct ViewService {
    categories: CategoryRepository,
    cities: CityRepository,
    reviews: ReviewRepository,
    offers: OfferRepository,
}

impl ViewService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            categories: CategoryRepository::new(db.clone()),
            cities: CityRepository::new(db.clone()),
            reviews: ReviewRepository::new(db.clone()),
            offers: OfferRepository::new(db),
        }
    }

    /// Resolve a shop's city, if its reference resolves at all
    pub async fn city_of(&self, shop: &Shop) -> RepoResult<Option<City>> {
        match &shop.city_id {
            Some(reference) => Ok(self
                .cities
                .resolve(reference)
                .await?
                .map(shared::models::City::from)),
            None => Ok(None),
        }
    }

    /// Resolve the shop's category references in order, omitting misses.
    /// The output list may be shorter than the reference list.
    async fn categories_of(&self, shop: &Shop) -> RepoResult<Vec<Category>> {
        let mut resolved = Vec::new();
        for reference in &shop.category {
            if let Some(category) = self.categories.resolve(reference).await? {
                resolved.push(category.into());
            }
        }
        Ok(resolved)
    }

    /// The shop document with every identifier canonicalized
    fn normalized_document(&self, shop: &Shop) -> RepoResult<serde_json::Value> {
        let mut doc = serde_json::to_value(shop)?;
        ident::canonicalize_value(&mut doc);
        Ok(doc)
    }

    /// Assemble the search/listing view for one shop. The city is passed
    /// in because the search engine has already resolved it for its
    /// place filter.
    pub async fn assemble(&self, shop: &Shop, city: Option<City>) -> RepoResult<ShopSearchResult> {
        let summary = self.reviews.aggregate(&shop.id_string()).await?;
        let photo = shop.photos.first().map(|data| Photo {
            data: data.clone(),
            content_type: PHOTO_CONTENT_TYPE.to_string(),
        });

        Ok(ShopSearchResult {
            shop: self.normalized_document(shop)?,
            categories: self.categories_of(shop).await?,
            city,
            photo,
            shop_name: shop.display_name(),
            avg_rating: summary.avg_rating,
            reviews_count: summary.reviews_count,
        })
    }

    /// Assemble the owner-facing view: the standard joins plus the shop's
    /// offers as index-aligned payload/type/id vectors, newest first.
    /// Offers without a payload are skipped entirely.
    pub async fn assemble_owner(&self, shop: &Shop) -> RepoResult<OwnerShopView> {
        let city = self.city_of(shop).await?;
        let offer_docs = self.offers.find_by_shop(&shop.id_string()).await?;

        let mut offers = Vec::new();
        let mut offer_types = Vec::new();
        let mut offer_ids = Vec::new();
        for offer in offer_docs {
            let Some(payload) = offer.file_base64.clone() else {
                continue;
            };
            offers.push(payload);
            offer_types.push(offer.file_type.as_str().to_string());
            offer_ids.push(offer.id_string());
        }

        Ok(OwnerShopView {
            shop: self.normalized_document(shop)?,
            categories: self.categories_of(shop).await?,
            city,
            offers,
            offer_types,
            offer_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{OfferCreate, OfferMedia, ReviewInsert, Shop, ShopCreate};
    use crate::db::repository::ShopRepository;
    use crate::db::test_support::memory_db;
    use serde_json::json;

    async fn seeded_shop(db: &Surreal<Db>) -> Shop {
        let _: Option<crate::db::models::Category> = db
            .create(("category", "c1"))
            .content(json!({ "name": "Bakery" }))
            .await
            .unwrap();
        ShopRepository::new(db.clone())
            .create(ShopCreate {
                shop_name: "Corner Bakery".into(),
                description: "Fresh bread".into(),
                address: "1 Main St".into(),
                phone_number: "555-0100".into(),
                email: "corner@example.com".into(),
                landmark: "Near the park".into(),
                category: vec!["category:c1".into(), "category:dangling".into()],
                city_id: "city:unknown".into(),
                photos: vec!["Zmlyc3Q=".into(), "c2Vjb25k".into()],
                keywords: vec!["bread".into()],
                user_id: "user:u1".into(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn assemble_omits_dangling_references() {
        let db = memory_db().await;
        let views = ViewService::new(db.clone());
        let shop = seeded_shop(&db).await;

        let city = views.city_of(&shop).await.unwrap();
        assert!(city.is_none());

        let view = views.assemble(&shop, city).await.unwrap();
        // Two category references, one dangling — output keeps only one
        assert_eq!(view.categories.len(), 1);
        assert_eq!(view.categories[0].name, "Bakery");
        assert!(view.city.is_none());
        assert_eq!(view.shop_name, "Corner Bakery");
        // First photo only, wrapped with the fixed content type
        let photo = view.photo.unwrap();
        assert_eq!(photo.data, "Zmlyc3Q=");
        assert_eq!(photo.content_type, "image/jpeg");
        // Zero reviews is the 0.0 / 0 convention
        assert_eq!(view.avg_rating, 0.0);
        assert_eq!(view.reviews_count, 0);
        // Every identifier in the raw document is a string
        assert!(view.shop["id"].is_string());
        assert!(view.shop["user_id"].is_string());
    }

    #[tokio::test]
    async fn assemble_carries_the_rating_aggregate() {
        let db = memory_db().await;
        let views = ViewService::new(db.clone());
        let shop = seeded_shop(&db).await;
        let reviews = ReviewRepository::new(db.clone());
        for rating in [3.0, 4.0, 5.0] {
            reviews
                .create(ReviewInsert {
                    shop_id: shop.id_string(),
                    rating,
                    review: "ok".into(),
                })
                .await
                .unwrap();
        }

        let view = views.assemble(&shop, None).await.unwrap();
        assert_eq!(view.avg_rating, 4.0);
        assert_eq!(view.reviews_count, 3);
    }

    #[tokio::test]
    async fn owner_view_aligns_offer_vectors_newest_first() {
        let db = memory_db().await;
        let views = ViewService::new(db.clone());
        let shop = seeded_shop(&db).await;
        let offers = OfferRepository::new(db.clone());
        let older = offers
            .create(OfferCreate {
                user_id: "user:u1".into(),
                shop_ids: vec![shop.id_string()],
                city_ids: vec![None],
                file_base64: "b2xk".into(),
                file_type: OfferMedia::Image,
                filename: "old.jpg".into(),
                uploaded_at: 1_000,
            })
            .await
            .unwrap();
        let newer = offers
            .create(OfferCreate {
                user_id: "user:u1".into(),
                shop_ids: vec![shop.id_string()],
                city_ids: vec![None],
                file_base64: "bmV3".into(),
                file_type: OfferMedia::Video,
                filename: "new.mp4".into(),
                uploaded_at: 2_000,
            })
            .await
            .unwrap();

        let view = views.assemble_owner(&shop).await.unwrap();
        assert_eq!(view.offers, vec!["bmV3", "b2xk"]);
        assert_eq!(view.offer_types, vec!["video", "image"]);
        assert_eq!(view.offer_ids, vec![newer.id_string(), older.id_string()]);
    }

    #[tokio::test]
    async fn owner_view_skips_offers_without_payload() {
        let db = memory_db().await;
        let views = ViewService::new(db.clone());
        let shop = seeded_shop(&db).await;
        // Legacy offer document with no payload at all
        let _: Option<crate::db::models::Offer> = db
            .create(("offer", "empty"))
            .content(json!({
                "user_id": "user:u1",
                "shop_ids": [shop.id_string()],
                "city_ids": [],
                "file_type": "image",
                "filename": "ghost.jpg",
                "uploaded_at": 5_000,
            }))
            .await
            .unwrap();

        let view = views.assemble_owner(&shop).await.unwrap();
        assert!(view.offers.is_empty());
        assert!(view.offer_ids.is_empty());
    }
}
