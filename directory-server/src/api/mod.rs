//! HTTP API
//!
//! One thin handler per core operation. Handlers validate input, call a
//! repository or service, and wrap the outcome in the response envelope —
//! no business logic lives here.

pub mod auth;
pub mod categories;
pub mod cities;
pub mod offers;
pub mod reviews;
pub mod search;
pub mod shops;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(root))
        .merge(auth::router())
        .merge(categories::router())
        .merge(cities::router())
        .merge(search::router())
        .merge(shops::router())
        .merge(reviews::router())
        .merge(offers::router())
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "API is running!" }))
}
