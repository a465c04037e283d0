//! Search handler

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::ShopSearchResult;

use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
    pub place: Option<String>,
}

/// This endpoint predates the envelope convention: it returns `data`
/// directly, and its clients depend on that shape.
#[derive(Debug, Serialize)]
pub struct SearchData {
    pub data: Vec<ShopSearchResult>,
}

/// GET /category/static/?name=&place= — fuzzy multi-field shop search,
/// sorted by average rating descending
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchData>> {
    let results = state
        .search_service()
        .search(params.name.as_deref(), params.place.as_deref())
        .await?;
    Ok(Json(SearchData { data: results }))
}
