//! Promotional offer endpoints

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/add_offer/", post(handler::add))
        .route("/delete_offer/", post(handler::delete))
}
