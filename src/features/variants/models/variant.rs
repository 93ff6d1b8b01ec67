use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for product variant (one color of a product)
#[derive(Debug, Clone, FromRow)]
pub struct ProductVariant {
    pub id: Uuid,
    pub product_id: Uuid,
    pub color: String,
    pub sku: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for an uploaded variant image
#[derive(Debug, Clone, FromRow)]
pub struct ProductImage {
    pub id: Uuid,
    pub variant_id: Uuid,
    pub url: String,
    pub is_main: bool,
    pub created_at: DateTime<Utc>,
}

/// Database model for per-size stock of a variant
#[derive(Debug, Clone, FromRow)]
pub struct Inventory {
    pub id: Uuid,
    pub variant_id: Uuid,
    pub size: String,
    pub stock: i32,
    pub available_stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
