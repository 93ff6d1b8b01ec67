use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::products::dtos::{
    CreateProductDto, CreateProductRequest, ProductResponseDto, ProductWithCategoryDto,
};
use crate::features::products::services::ProductService;
use crate::shared::types::{ApiResponse, Meta};

/// Create a product
///
/// The body nests the product under `create`; the SKU is generated from the
/// category and product names.
#[utoipa::path(
    post,
    path = "/api/product",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error or unknown category")
    ),
    security(("cookie_auth" = [])),
    tag = "products"
)]
pub async fn create_product(
    State(service): State<Arc<ProductService>>,
    AppJson(body): AppJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponseDto>>)> {
    body.create
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = service.create(body.create).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(product), None, None)),
    ))
}

/// List all products with their category
#[utoipa::path(
    get,
    path = "/api/product",
    responses(
        (status = 200, description = "All products", body = ApiResponse<Vec<ProductWithCategoryDto>>),
    ),
    security(("cookie_auth" = [])),
    tag = "products"
)]
pub async fn get_all_products(
    State(service): State<Arc<ProductService>>,
) -> Result<Json<ApiResponse<Vec<ProductWithCategoryDto>>>> {
    let products = service.get_all().await?;
    let total = products.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(products),
        None,
        Some(Meta { total }),
    )))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/api/product/{id}",
    params(
        ("id" = Uuid, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Product not found")
    ),
    security(("cookie_auth" = [])),
    tag = "products"
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/api/product/{id}",
    params(
        ("id" = Uuid, Path, description = "Product id")
    ),
    request_body = CreateProductDto,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error, unknown category or product")
    ),
    security(("cookie_auth" = [])),
    tag = "products"
)]
pub async fn update_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CreateProductDto>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

/// Delete a product together with its variants
#[utoipa::path(
    delete,
    path = "/api/product/{id}",
    params(
        ("id" = Uuid, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<ProductResponseDto>),
        (status = 404, description = "Product not found")
    ),
    security(("cookie_auth" = [])),
    tag = "products"
)]
pub async fn delete_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service.delete(id).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}
