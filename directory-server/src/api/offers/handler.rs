//! Offer handlers
//!
//! An offer targets either one shop or, with `target_shop = "ALL"`, every
//! shop the user owns. The stored document keeps `shop_ids` and
//! `city_ids` aligned so listing pages can filter offers by city without
//! resolving shops again.

use axum::{
    Form, Json,
    extract::{Multipart, State},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use shared::ApiResponse;

use crate::core::ServerState;
use crate::db::ident;
use crate::db::models::{OfferCreate, OfferMedia};
use crate::db::repository::{OfferRepository, ShopRepository};
use crate::utils::{AppError, AppResult};

const TARGET_ALL: &str = "ALL";

#[derive(Default)]
struct OfferForm {
    user_id: Option<String>,
    target_shop: Option<String>,
    file: Option<(String, Option<String>, Vec<u8>)>,
}

async fn read_offer_form(mut multipart: Multipart) -> AppResult<OfferForm> {
    let mut form = OfferForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed form data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "user_id" => {
                form.user_id = Some(field.text().await.map_err(|e| {
                    AppError::validation(format!("Malformed field user_id: {e}"))
                })?)
            }
            "target_shop" => {
                form.target_shop = Some(field.text().await.map_err(|e| {
                    AppError::validation(format!("Malformed field target_shop: {e}"))
                })?)
            }
            "file" => {
                let filename = field.file_name().unwrap_or("offer").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read file: {e}")))?;
                form.file = Some((filename, content_type, bytes.to_vec()));
            }
            _ => {}
        }
    }
    Ok(form)
}

/// Media kind from the declared content type, falling back to a guess
/// from the filename when the client sent none
fn media_type(filename: &str, content_type: Option<&str>) -> AppResult<OfferMedia> {
    let mime = match content_type {
        Some(ct) => ct.to_string(),
        None => mime_guess::from_path(filename)
            .first_or_octet_stream()
            .to_string(),
    };
    if mime.starts_with("video/") {
        Ok(OfferMedia::Video)
    } else if mime.starts_with("image/") {
        Ok(OfferMedia::Image)
    } else {
        Err(AppError::validation("Only image/video allowed"))
    }
}

/// POST /add_offer/
pub async fn add(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<()>>> {
    let form = read_offer_form(multipart).await?;

    let user_id = form
        .user_id
        .ok_or_else(|| AppError::validation("user_id missing"))?;
    if ident::parse_encoded(&user_id)
        .filter(|rid| rid.table() == "user")
        .is_none()
    {
        return Err(AppError::validation("Invalid user id"));
    }
    let target_shop = form
        .target_shop
        .ok_or_else(|| AppError::validation("target_shop missing"))?;
    let (filename, content_type, bytes) = form
        .file
        .ok_or_else(|| AppError::validation("file missing"))?;
    let file_type = media_type(&filename, content_type.as_deref())?;

    let shops = ShopRepository::new(state.db.clone());
    let mut shop_ids = Vec::new();
    let mut city_ids = Vec::new();
    if target_shop == TARGET_ALL {
        let owned = shops.find_by_user(&user_id).await?;
        if owned.is_empty() {
            return Err(AppError::not_found("No shops found"));
        }
        for shop in owned {
            shop_ids.push(shop.id_string());
            city_ids.push(shop.city_id.as_ref().and_then(|c| c.canonical()));
        }
    } else {
        if ident::parse_encoded(&target_shop)
            .filter(|rid| rid.table() == "shop")
            .is_none()
        {
            return Err(AppError::validation("Invalid shop id"));
        }
        let shop = shops
            .find_by_id_str(&target_shop)
            .await?
            .ok_or_else(|| AppError::not_found("Shop not found"))?;
        shop_ids.push(shop.id_string());
        city_ids.push(shop.city_id.as_ref().and_then(|c| c.canonical()));
    }

    OfferRepository::new(state.db.clone())
        .create(OfferCreate {
            user_id,
            shop_ids,
            city_ids,
            file_base64: BASE64.encode(&bytes),
            file_type,
            filename,
            uploaded_at: shared::util::now_millis(),
        })
        .await?;

    Ok(Json(ApiResponse::message("Offer added successfully")))
}

#[derive(Debug, Deserialize)]
pub struct DeleteOfferForm {
    pub offer_id: String,
}

/// POST /delete_offer/
pub async fn delete(
    State(state): State<ServerState>,
    Form(form): Form<DeleteOfferForm>,
) -> AppResult<Json<ApiResponse<()>>> {
    let deleted = OfferRepository::new(state.db.clone())
        .delete(&form.offer_id)
        .await?;
    if deleted {
        Ok(Json(ApiResponse::message("Offer deleted")))
    } else {
        Err(AppError::not_found("Offer not found"))
    }
}
