use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::variants::dtos::{
    CreateVariantDto, InventoryResponseDto, UpsertInventoryDto, VariantResponseDto,
    VariantWithProductDto,
};
use crate::features::variants::services::{InventoryService, UploadedImage, VariantService};
use crate::shared::types::ApiResponse;

/// Create a variant
///
/// Accepts multipart/form-data with:
/// - `payload`: JSON-encoded variant data (productId, color, inventory)
/// - `images`: one or more image files; the first becomes the main image
#[utoipa::path(
    post,
    path = "/api/variants",
    tag = "variants",
    request_body(
        content = CreateVariantDto,
        content_type = "multipart/form-data",
        description = "Variant creation form: a `payload` JSON field plus `images` files",
    ),
    responses(
        (status = 201, description = "Variant created", body = ApiResponse<VariantResponseDto>),
        (status = 400, description = "Invalid payload or unknown product"),
        (status = 502, description = "Image upload failed")
    ),
    security(("cookie_auth" = []))
)]
pub async fn create_variant(
    State(service): State<Arc<VariantService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<VariantResponseDto>>)> {
    let mut payload: Option<CreateVariantDto> = None;
    let mut images: Vec<UploadedImage> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "payload" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read payload field: {}", e))
                })?;
                let dto: CreateVariantDto = serde_json::from_str(&text)
                    .map_err(|e| AppError::BadRequest(format!("Invalid payload JSON: {}", e)))?;
                payload = Some(dto);
            }
            "images" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read image bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read image data: {}", e))
                })?;

                images.push(UploadedImage {
                    data: data.to_vec(),
                    content_type,
                });
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let payload =
        payload.ok_or_else(|| AppError::BadRequest("Payload field is required".to_string()))?;
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let variant = service.create(payload, images).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(variant), None, None)),
    ))
}

/// List a product's variants with images, inventory and the product
#[utoipa::path(
    get,
    path = "/api/variants/product/{id}",
    params(
        ("id" = Uuid, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Variants of the product", body = ApiResponse<Vec<VariantWithProductDto>>),
        (status = 400, description = "Product not found")
    ),
    security(("cookie_auth" = [])),
    tag = "variants"
)]
pub async fn get_product_variants(
    State(service): State<Arc<VariantService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<VariantWithProductDto>>>> {
    let variants = service.get_by_product(id).await?;
    Ok(Json(ApiResponse::success(Some(variants), None, None)))
}

/// Create or update inventory entries of a variant
#[utoipa::path(
    put,
    path = "/api/variants/{id}/inventory",
    params(
        ("id" = Uuid, Path, description = "Variant id")
    ),
    request_body = UpsertInventoryDto,
    responses(
        (status = 200, description = "Inventory after the upsert", body = ApiResponse<Vec<InventoryResponseDto>>),
        (status = 400, description = "Validation error or unknown variant"),
        (status = 404, description = "Referenced inventory entry not found")
    ),
    security(("cookie_auth" = [])),
    tag = "variants"
)]
pub async fn upsert_inventory(
    State(service): State<Arc<InventoryService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpsertInventoryDto>,
) -> Result<Json<ApiResponse<Vec<InventoryResponseDto>>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let inventory = service.create_or_update(id, dto.inventory).await?;
    Ok(Json(ApiResponse::success(Some(inventory), None, None)))
}

/// Delete one inventory entry
#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    params(
        ("id" = Uuid, Path, description = "Inventory entry id")
    ),
    responses(
        (status = 200, description = "Inventory entry deleted", body = ApiResponse<InventoryResponseDto>),
        (status = 404, description = "Inventory entry not found")
    ),
    security(("cookie_auth" = [])),
    tag = "variants"
)]
pub async fn delete_inventory(
    State(service): State<Arc<InventoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InventoryResponseDto>>> {
    let deleted = service.delete(id).await?;
    Ok(Json(ApiResponse::success(Some(deleted), None, None)))
}
