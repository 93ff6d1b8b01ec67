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
use crate::features::categories::dtos::{
    CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, DeletedCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::ApiResponse;

/// Create a category
///
/// Roots omit `parentId`; children get `parent.depth + 1` assigned.
#[utoipa::path(
    post,
    path = "/api/category",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Parent category not found")
    ),
    security(("cookie_auth" = [])),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category), None, None)),
    ))
}

/// Get the category forest
///
/// Returns root categories with their `children` nested recursively.
#[utoipa::path(
    get,
    path = "/api/category",
    responses(
        (status = 200, description = "Category forest", body = ApiResponse<Vec<CategoryTreeDto>>),
    ),
    security(("cookie_auth" = [])),
    tag = "categories"
)]
pub async fn get_category_tree(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryTreeDto>>>> {
    let forest = service.tree().await?;
    Ok(Json(ApiResponse::success(Some(forest), None, None)))
}

/// Update a category
///
/// Only name, description, meta fields and image change; `parentId` in the
/// body has no effect.
#[utoipa::path(
    put,
    path = "/api/category/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    request_body = CreateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found")
    ),
    security(("cookie_auth" = [])),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Delete a category and its entire subtree
///
/// Responds with the pre-deletion snapshot carrying only the first-level
/// children and the parent.
#[utoipa::path(
    delete,
    path = "/api/category/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category and descendants deleted", body = ApiResponse<DeletedCategoryDto>),
        (status = 404, description = "Category not found")
    ),
    security(("cookie_auth" = [])),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedCategoryDto>>> {
    let snapshot = service.delete_subtree(id).await?;
    Ok(Json(ApiResponse::success(Some(snapshot), None, None)))
}
