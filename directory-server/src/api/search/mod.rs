//! Shop search endpoint

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/category/static/", get(handler::search))
}
