//! User (shop owner) types

use serde::{Deserialize, Serialize};

use super::views::OwnerShopView;

/// Credentials submitted on register / login
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Payload returned on successful registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub user_id: String,
}

/// Payload returned on successful login: the owner id plus their shops
/// with offers already joined in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub user_id: String,
    pub shops: Vec<OwnerShopView>,
}
