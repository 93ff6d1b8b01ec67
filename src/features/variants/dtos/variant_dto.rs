use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::products::dtos::ProductResponseDto;
use crate::features::variants::models::{Inventory, ProductImage, ProductVariant};

/// One per-size stock entry of a new variant
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryDto {
    #[validate(length(min = 1, message = "Size is required"))]
    pub size: String,

    pub stock: i32,
    pub available_stock: i32,
}

/// JSON payload of the multipart variant-creation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVariantDto {
    pub product_id: Uuid,

    #[validate(length(min = 1, message = "Color is required"))]
    pub color: String,

    #[validate(nested)]
    pub inventory: Vec<CreateInventoryDto>,
}

/// Inventory entry for create-or-update; entries with an id are updated,
/// the rest inserted
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntryDto {
    pub id: Option<Uuid>,

    #[validate(length(min = 1, message = "Size is required"))]
    pub size: String,

    pub stock: i32,
    pub available_stock: i32,
}

/// Request body for the inventory upsert endpoint
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertInventoryDto {
    #[validate(length(min = 1, message = "At least one inventory entry is required"), nested)]
    pub inventory: Vec<InventoryEntryDto>,
}

/// Response DTO for a variant image
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductImageDto {
    pub id: Uuid,
    pub url: String,
    pub is_main: bool,
}

impl From<ProductImage> for ProductImageDto {
    fn from(i: ProductImage) -> Self {
        Self {
            id: i.id,
            url: i.url,
            is_main: i.is_main,
        }
    }
}

/// Response DTO for an inventory entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponseDto {
    pub id: Uuid,
    pub variant_id: Uuid,
    pub size: String,
    pub stock: i32,
    pub available_stock: i32,
}

impl From<Inventory> for InventoryResponseDto {
    fn from(i: Inventory) -> Self {
        Self {
            id: i.id,
            variant_id: i.variant_id,
            size: i.size,
            stock: i.stock,
            available_stock: i.available_stock,
        }
    }
}

/// Response DTO for a variant with images and inventory
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariantResponseDto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub color: String,
    pub sku: String,
    pub images: Vec<ProductImageDto>,
    pub inventory: Vec<InventoryResponseDto>,
}

impl VariantResponseDto {
    pub fn assemble(
        variant: ProductVariant,
        images: Vec<ProductImage>,
        inventory: Vec<Inventory>,
    ) -> Self {
        Self {
            id: variant.id,
            product_id: variant.product_id,
            color: variant.color,
            sku: variant.sku,
            images: images.into_iter().map(Into::into).collect(),
            inventory: inventory.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response DTO for a variant with its product attached
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariantWithProductDto {
    #[serde(flatten)]
    pub variant: VariantResponseDto,
    pub product: ProductResponseDto,
}
