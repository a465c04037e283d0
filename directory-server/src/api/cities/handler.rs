//! City handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::ApiResponse;
use shared::models::City;

use crate::core::ServerState;
use crate::db::repository::CityRepository;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

/// GET /search_city?query= — autocomplete suggestions, capped at 20
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<Vec<City>>>> {
    let repo = CityRepository::new(state.db.clone());
    let cities = repo.search_text(&params.query).await?;
    Ok(Json(ApiResponse::ok(
        cities.into_iter().map(Into::into).collect(),
    )))
}
