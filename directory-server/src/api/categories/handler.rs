//! Category handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::ApiResponse;
use shared::models::Category;

use crate::core::ServerState;
use crate::db::repository::CategoryRepository;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

/// GET /category/get — all categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.find_all().await?;
    Ok(Json(ApiResponse::ok(
        categories.into_iter().map(Into::into).collect(),
    )))
}

/// GET /search_category?query= — substring suggestions
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.search_text(&params.query).await?;
    Ok(Json(ApiResponse::ok(
        categories.into_iter().map(Into::into).collect(),
    )))
}
