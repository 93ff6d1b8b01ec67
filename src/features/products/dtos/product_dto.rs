use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::products::models::Product;

/// Request DTO for creating or updating a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    /// Must be positive; checked in the service since `validator` has no
    /// Decimal support
    pub price: Decimal,

    pub category_id: Uuid,
}

/// Creation request body; the storefront nests the DTO under `create`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub create: CreateProductDto,
}

/// Response DTO for a product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub sku: String,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            sku: p.sku,
            category_id: p.category_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Joined row for the product list (product plus its category's display fields)
#[derive(Debug, Clone, FromRow)]
pub struct ProductWithCategoryRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub sku: String,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_name: String,
    pub category_description: String,
    pub category_image: Option<String>,
}

/// Category display fields embedded in product listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummaryDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
}

/// Response DTO for a product with its category attached
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithCategoryDto {
    #[serde(flatten)]
    pub product: ProductResponseDto,
    pub category: CategorySummaryDto,
}

impl From<ProductWithCategoryRow> for ProductWithCategoryDto {
    fn from(r: ProductWithCategoryRow) -> Self {
        Self {
            category: CategorySummaryDto {
                id: r.category_id,
                name: r.category_name,
                description: r.category_description,
                image: r.category_image,
            },
            product: ProductResponseDto {
                id: r.id,
                name: r.name,
                description: r.description,
                price: r.price,
                sku: r.sku,
                category_id: r.category_id,
                created_at: r.created_at,
                updated_at: r.updated_at,
            },
        }
    }
}
