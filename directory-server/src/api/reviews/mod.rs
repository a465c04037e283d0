//! Review endpoints

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/shop/reviews", get(handler::list))
        .route("/shop/review/add", post(handler::add))
}
