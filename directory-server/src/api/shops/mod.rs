//! Shop endpoints

mod handler;

pub use handler::owner_shop_views;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/add_shop/", post(handler::add_shop))
        .route("/update_shop/", post(handler::update_shop))
        .route("/delete_shop/", post(handler::delete_shop))
        .route("/delete_photo/", post(handler::delete_photo))
        .route("/shop/all", get(handler::list_all))
        .route("/shop/photos", get(handler::photos))
        .route("/get_shops/{user_id}", get(handler::user_shops))
}
