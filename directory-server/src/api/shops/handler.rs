//! Shop handlers
//!
//! Registration and update arrive as multipart forms (text fields plus
//! photo files). Category names are resolved to ids up front — an
//! unknown category is a caller error here, unlike the lenient read
//! paths. Photos travel base64-encoded end to end.

use axum::{
    Form, Json,
    extract::{Multipart, Path, Query, State},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::ApiResponse;
use shared::models::{CityFields, OwnerShopView};

use crate::core::ServerState;
use crate::db::ident::{self, EntityRef};
use crate::db::models::{ShopCreate, ShopUpdate};
use crate::db::repository::{CategoryRepository, CityRepository, ShopRepository};
use crate::utils::{AppError, AppResult};

/// Accumulated multipart fields for add/update
#[derive(Default)]
struct ShopForm {
    shop_id: Option<String>,
    user_id: Option<String>,
    shop_name: Option<String>,
    description: Option<String>,
    address: Option<String>,
    phone_number: Option<String>,
    email: Option<String>,
    landmark: Option<String>,
    category_list: Option<String>,
    city_name: Option<String>,
    district: Option<String>,
    pincode: Option<String>,
    state: Option<String>,
    keywords: Option<String>,
    photos: Vec<Vec<u8>>,
}

async fn read_shop_form(mut multipart: Multipart) -> AppResult<ShopForm> {
    let mut form = ShopForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed form data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == "photos" {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Failed to read photo: {e}")))?;
            form.photos.push(bytes.to_vec());
            continue;
        }
        let value = field
            .text()
            .await
            .map_err(|e| AppError::validation(format!("Malformed field {name}: {e}")))?;
        // An empty text field means the client left it blank; treat it the
        // same as absent so partial updates never blank stored values
        if value.is_empty() {
            continue;
        }
        match name.as_str() {
            "shop_id" => form.shop_id = Some(value),
            "user_id" => form.user_id = Some(value),
            "shop_name" => form.shop_name = Some(value),
            "description" => form.description = Some(value),
            "address" => form.address = Some(value),
            "phone_number" => form.phone_number = Some(value),
            "email" => form.email = Some(value),
            "landmark" => form.landmark = Some(value),
            "category_list" => form.category_list = Some(value),
            "city_name" => form.city_name = Some(value),
            "district" => form.district = Some(value),
            "pincode" => form.pincode = Some(value),
            "state" => form.state = Some(value),
            "keywords" => form.keywords = Some(value),
            _ => {}
        }
    }
    Ok(form)
}

fn require(value: Option<String>, name: &str) -> AppResult<String> {
    value.ok_or_else(|| AppError::validation(format!("{name} missing")))
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve comma-separated category names into canonical ids; an unknown
/// name fails the whole request.
async fn resolve_category_names(
    repo: &CategoryRepository,
    category_list: &str,
) -> AppResult<Vec<String>> {
    let mut ids = Vec::new();
    for name in split_csv(category_list) {
        let category = repo
            .find_by_name(&name)
            .await?
            .ok_or_else(|| AppError::validation(format!("Category '{name}' not found")))?;
        ids.push(category.id_string());
    }
    Ok(ids)
}

/// POST /add_shop/
pub async fn add_shop(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<()>>> {
    let form = read_shop_form(multipart).await?;

    let user_id = require(form.user_id, "user_id")?;
    if ident::parse_encoded(&user_id)
        .filter(|rid| rid.table() == "user")
        .is_none()
    {
        return Err(AppError::validation("Invalid user id"));
    }

    let city_fields = CityFields {
        city_name: require(form.city_name, "city_name")?,
        district: require(form.district, "district")?,
        pincode: require(form.pincode, "pincode")?,
        state: require(form.state, "state")?,
    };
    let city_id = CityRepository::new(state.db.clone())
        .find_or_create(&city_fields)
        .await?;

    let category_list = require(form.category_list, "category_list")?;
    let categories = CategoryRepository::new(state.db.clone());
    let category_ids = resolve_category_names(&categories, &category_list).await?;

    let photos = form.photos.iter().map(|p| BASE64.encode(p)).collect();

    ShopRepository::new(state.db.clone())
        .create(ShopCreate {
            shop_name: require(form.shop_name, "shop_name")?,
            description: require(form.description, "description")?,
            address: require(form.address, "address")?,
            phone_number: require(form.phone_number, "phone_number")?,
            email: require(form.email, "email")?,
            landmark: require(form.landmark, "landmark")?,
            category: category_ids,
            city_id,
            photos,
            keywords: split_csv(&require(form.keywords, "keywords")?),
            user_id,
        })
        .await?;

    Ok(Json(ApiResponse::message("Shop added")))
}

/// POST /update_shop/ — partial update; new photos are appended with an
/// atomic array update rather than rewriting the whole document
pub async fn update_shop(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<()>>> {
    let form = read_shop_form(multipart).await?;
    let shop_id = require(form.shop_id, "shop_id")?;

    let category = match &form.category_list {
        Some(list) => {
            let categories = CategoryRepository::new(state.db.clone());
            Some(resolve_category_names(&categories, list).await?)
        }
        None => None,
    };

    let city_id = match form.city_name {
        Some(city_name) => {
            let fields = CityFields {
                city_name,
                district: form.district.unwrap_or_default(),
                pincode: form.pincode.unwrap_or_default(),
                state: form.state.unwrap_or_default(),
            };
            Some(
                CityRepository::new(state.db.clone())
                    .find_or_create(&fields)
                    .await?,
            )
        }
        None => None,
    };

    let repo = ShopRepository::new(state.db.clone());
    repo.update(
        &shop_id,
        ShopUpdate {
            shop_name: form.shop_name,
            description: form.description,
            address: form.address,
            phone_number: form.phone_number,
            email: form.email,
            landmark: form.landmark,
            category,
            city_id,
            keywords: form.keywords.as_deref().map(split_csv),
        },
    )
    .await?;

    if !form.photos.is_empty() {
        let encoded = form.photos.iter().map(|p| BASE64.encode(p)).collect();
        repo.append_photos(&shop_id, encoded).await?;
    }

    Ok(Json(ApiResponse::message("Shop updated")))
}

#[derive(Debug, Deserialize)]
pub struct DeleteShopForm {
    pub shop_id: String,
}

/// POST /delete_shop/
pub async fn delete_shop(
    State(state): State<ServerState>,
    Form(form): Form<DeleteShopForm>,
) -> AppResult<Json<ApiResponse<()>>> {
    let deleted = ShopRepository::new(state.db.clone())
        .delete(&form.shop_id)
        .await?;
    if deleted {
        Ok(Json(ApiResponse::message("Shop deleted")))
    } else {
        Err(AppError::not_found("Shop not found"))
    }
}

#[derive(Debug, Deserialize)]
pub struct DeletePhotoForm {
    pub shop_id: String,
    pub photo_index: usize,
}

/// POST /delete_photo/
pub async fn delete_photo(
    State(state): State<ServerState>,
    Form(form): Form<DeletePhotoForm>,
) -> AppResult<Json<ApiResponse<()>>> {
    ShopRepository::new(state.db.clone())
        .remove_photo(&form.shop_id, form.photo_index)
        .await?;
    Ok(Json(ApiResponse::message("Photo deleted")))
}

/// GET /shop/all — raw shop documents with identifiers canonicalized
pub async fn list_all(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Value>>>> {
    let shops = ShopRepository::new(state.db.clone()).find_all().await?;
    let mut docs = Vec::with_capacity(shops.len());
    for shop in &shops {
        let mut doc = serde_json::to_value(shop)
            .map_err(|e| AppError::internal(format!("Serialization failed: {e}")))?;
        ident::canonicalize_value(&mut doc);
        docs.push(doc);
    }
    Ok(Json(ApiResponse::ok(docs)))
}

#[derive(Debug, Deserialize)]
pub struct PhotosParams {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct PhotosData {
    pub photos: Vec<String>,
}

/// GET /shop/photos?id= — every photo of one shop
pub async fn photos(
    State(state): State<ServerState>,
    Query(params): Query<PhotosParams>,
) -> AppResult<Json<ApiResponse<PhotosData>>> {
    let shop = ShopRepository::new(state.db.clone())
        .find_by_id_str(&params.id)
        .await?
        .ok_or_else(|| AppError::not_found("Shop not found"))?;
    Ok(Json(ApiResponse::ok(PhotosData {
        photos: shop.photos,
    })))
}

/// GET /get_shops/{user_id} — owner listing with offers joined in
pub async fn user_shops(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<OwnerShopView>>>> {
    let views = owner_shop_views(&state, &user_id).await?;
    Ok(Json(ApiResponse::ok(views)))
}

/// Assemble the owner views for every shop of `user_id`. Shared with the
/// login handler, which returns the same payload.
pub async fn owner_shop_views(
    state: &ServerState,
    user_id: &str,
) -> AppResult<Vec<OwnerShopView>> {
    if EntityRef::from_text(user_id)
        .record_id()
        .filter(|rid| rid.table() == "user")
        .is_none()
    {
        return Err(AppError::validation("Invalid user id"));
    }

    let shops = ShopRepository::new(state.db.clone())
        .find_by_user(user_id)
        .await?;
    let view_service = state.view_service();
    let mut views = Vec::with_capacity(shops.len());
    for shop in &shops {
        views.push(view_service.assemble_owner(shop).await?);
    }
    Ok(views)
}
