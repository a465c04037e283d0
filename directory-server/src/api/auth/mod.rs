//! Registration and login endpoints

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/register/", post(handler::register))
        .route("/login/", post(handler::login))
}
