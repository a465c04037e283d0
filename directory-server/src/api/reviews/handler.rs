//! Review handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::ApiResponse;
use shared::models::{Review, ReviewCreate};

use crate::core::ServerState;
use crate::db::models::ReviewInsert;
use crate::db::repository::ReviewRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub id: String,
}

/// GET /shop/reviews?id= — all reviews for a shop
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<Review>>>> {
    let reviews = ReviewRepository::new(state.db.clone())
        .find_by_shop(&params.id)
        .await?;
    Ok(Json(ApiResponse::ok(
        reviews.into_iter().map(Into::into).collect(),
    )))
}

/// POST /shop/review/add
pub async fn add(
    State(state): State<ServerState>,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let shop_id = payload
        .shop_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::validation("shop_id missing"))?;
    let rating = payload
        .rating
        .ok_or_else(|| AppError::validation("rating missing"))?;
    let review = payload
        .review
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::validation("review missing"))?;

    let created = ReviewRepository::new(state.db.clone())
        .create(ReviewInsert {
            shop_id,
            rating,
            review,
        })
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        created.into(),
        "Review added",
    )))
}
