//! Review Repository and rating aggregation

use shared::models::RatingSummary;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Review, ReviewInsert};

const TABLE: &str = "review";

#[derive(Clone)]
pub struct ReviewRepository {
    base: BaseRepository,
}

impl ReviewRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All reviews whose `shop_id` equals the string-encoded shop id
    pub async fn find_by_shop(&self, shop_id: &str) -> RepoResult<Vec<Review>> {
        let sid = shop_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM review WHERE shop_id = $sid")
            .bind(("sid", sid))
            .await?;
        let reviews: Vec<Review> = result.take(0)?;
        Ok(reviews)
    }

    /// Append a review
    pub async fn create(&self, data: ReviewInsert) -> RepoResult<Review> {
        let created: Option<Review> = self.base.db().create(TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create review".to_string()))
    }

    /// Average rating and review count for a shop.
    ///
    /// Zero reviews aggregates to `0.0` / `0` by convention; "shop has no
    /// reviews" and "shop does not exist" are distinguished by the caller,
    /// not here.
    pub async fn aggregate(&self, shop_id: &str) -> RepoResult<RatingSummary> {
        let reviews = self.find_by_shop(shop_id).await?;
        let ratings: Vec<f64> = reviews.iter().map(|r| r.rating).collect();
        Ok(summarize(&ratings))
    }
}

/// Mean of the ratings rounded to one decimal place, plus the count
pub fn summarize(ratings: &[f64]) -> RatingSummary {
    if ratings.is_empty() {
        return RatingSummary::default();
    }
    let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
    RatingSummary {
        avg_rating: (mean * 10.0).round() / 10.0,
        reviews_count: ratings.len(),
    }
}
