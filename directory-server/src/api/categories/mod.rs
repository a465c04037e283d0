//! Category endpoints

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/category/get", get(handler::list))
        .route("/search_category", get(handler::search))
}
