//! Auth handlers
//!
//! Passwords are stored as plain SHA-256 digests, matching the data the
//! existing user records carry. Session/token security is explicitly out
//! of scope for this service.

use axum::{Form, Json, extract::State};
use sha2::{Digest, Sha256};
use shared::ApiResponse;
use shared::models::{Credentials, LoginData, RegisteredUser};

use crate::api::shops::owner_shop_views;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// POST /register/
pub async fn register(
    State(state): State<ServerState>,
    Form(creds): Form<Credentials>,
) -> AppResult<Json<ApiResponse<RegisteredUser>>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .create(&creds.email, &hash_password(&creds.password))
        .await?;
    Ok(Json(ApiResponse::ok(RegisteredUser {
        user_id: user.id_string(),
    })))
}

/// POST /login/ — verifies credentials and returns the owner's shops with
/// offers already joined in, so the client renders the dashboard from one
/// round trip.
pub async fn login(
    State(state): State<ServerState>,
    Form(creds): Form<Credentials>,
) -> AppResult<Json<ApiResponse<LoginData>>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_email(&creds.email)
        .await?
        .filter(|u| u.password == hash_password(&creds.password))
        .ok_or_else(|| AppError::validation("Invalid email or password"))?;

    let user_id = user.id_string();
    let shops = owner_shop_views(&state, &user_id).await?;
    Ok(Json(ApiResponse::ok(LoginData { user_id, shops })))
}
