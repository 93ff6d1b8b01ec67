use std::sync::Arc;

use futures::future::try_join_all;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::models::Product;
use crate::features::variants::dtos::{
    CreateVariantDto, VariantResponseDto, VariantWithProductDto,
};
use crate::features::variants::models::{Inventory, ProductImage, ProductVariant};
use crate::modules::storage::MediaStorage;
use crate::shared::constants::SKU_COMPONENT_LEN;

/// An image received from the multipart request, ready for upload
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Splice a color code into a product SKU: `CAT-PRO-NNNN` becomes
/// `CAT-PRO-COL-NNNN`.
///
/// A product SKU that does not split into its three expected parts falls
/// back to `GEN-<sku>-COL` instead of failing the whole creation.
pub fn generate_variant_sku(color: &str, product_sku: &str) -> String {
    let color_code: String = color
        .chars()
        .filter(|c| !c.is_whitespace())
        .take(SKU_COMPONENT_LEN)
        .collect::<String>()
        .to_uppercase();

    let parts: Vec<&str> = product_sku.split('-').collect();
    if parts.len() < 3 {
        tracing::warn!("Unexpected product SKU format: {}", product_sku);
        return format!("GEN-{}-{}", product_sku, color_code);
    }

    format!("{}-{}-{}-{}", parts[0], parts[1], color_code, parts[2])
}

/// Service for product variant operations
pub struct VariantService {
    pool: PgPool,
    storage: Arc<MediaStorage>,
}

impl VariantService {
    pub fn new(pool: PgPool, storage: Arc<MediaStorage>) -> Self {
        Self { pool, storage }
    }

    /// Create a variant with its images and inventory.
    ///
    /// The product lookup and the image uploads run concurrently; the
    /// database writes then share one transaction.
    pub async fn create(
        &self,
        dto: CreateVariantDto,
        images: Vec<UploadedImage>,
    ) -> Result<VariantResponseDto> {
        let (product, urls) = tokio::try_join!(
            self.find_product(dto.product_id),
            self.upload_images(images)
        )?;

        let product = product
            .ok_or_else(|| AppError::BadRequest("Product Not Found".to_string()))?;

        let sku = generate_variant_sku(&dto.color, &product.sku);

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let variant = sqlx::query_as::<_, ProductVariant>(
            r#"
            INSERT INTO product_variants (product_id, color, sku)
            VALUES ($1, $2, $3)
            RETURNING id, product_id, color, sku, created_at, updated_at
            "#,
        )
        .bind(dto.product_id)
        .bind(&dto.color)
        .bind(&sku)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create variant: {:?}", e);
            AppError::Database(e)
        })?;

        let mut inserted_images = Vec::with_capacity(urls.len());
        for (index, url) in urls.iter().enumerate() {
            let image = sqlx::query_as::<_, ProductImage>(
                r#"
                INSERT INTO product_images (variant_id, url, is_main)
                VALUES ($1, $2, $3)
                RETURNING id, variant_id, url, is_main, created_at
                "#,
            )
            .bind(variant.id)
            .bind(url)
            .bind(index == 0) // first image is the main one
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;
            inserted_images.push(image);
        }

        let mut inserted_inventory = Vec::with_capacity(dto.inventory.len());
        for entry in &dto.inventory {
            let row = sqlx::query_as::<_, Inventory>(
                r#"
                INSERT INTO inventory (variant_id, size, stock, available_stock)
                VALUES ($1, $2, $3, $4)
                RETURNING id, variant_id, size, stock, available_stock, created_at, updated_at
                "#,
            )
            .bind(variant.id)
            .bind(&entry.size)
            .bind(entry.stock)
            .bind(entry.available_stock)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;
            inserted_inventory.push(row);
        }

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Variant created: id={}, sku={}, images={}, sizes={}",
            variant.id,
            variant.sku,
            inserted_images.len(),
            inserted_inventory.len()
        );

        Ok(VariantResponseDto::assemble(
            variant,
            inserted_images,
            inserted_inventory,
        ))
    }

    /// Variants of a product, each with images, inventory and the product
    pub async fn get_by_product(&self, product_id: Uuid) -> Result<Vec<VariantWithProductDto>> {
        let product = self
            .find_product(product_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Product Not Found".to_string()))?;

        let variants = sqlx::query_as::<_, ProductVariant>(
            r#"
            SELECT id, product_id, color, sku, created_at, updated_at
            FROM product_variants
            WHERE product_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(product.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list variants: {:?}", e);
            AppError::Database(e)
        })?;

        let mut result = Vec::with_capacity(variants.len());
        for variant in variants {
            let images = sqlx::query_as::<_, ProductImage>(
                r#"
                SELECT id, variant_id, url, is_main, created_at
                FROM product_images
                WHERE variant_id = $1
                ORDER BY is_main DESC, created_at ASC
                "#,
            )
            .bind(variant.id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

            let inventory = sqlx::query_as::<_, Inventory>(
                r#"
                SELECT id, variant_id, size, stock, available_stock, created_at, updated_at
                FROM inventory
                WHERE variant_id = $1
                ORDER BY size ASC
                "#,
            )
            .bind(variant.id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

            result.push(VariantWithProductDto {
                variant: VariantResponseDto::assemble(variant, images, inventory),
                product: product.clone().into(),
            });
        }

        Ok(result)
    }

    async fn find_product(&self, id: Uuid) -> Result<Option<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, sku, category_id, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch product for variant: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn upload_images(&self, images: Vec<UploadedImage>) -> Result<Vec<String>> {
        try_join_all(images.into_iter().map(|image| {
            let storage = Arc::clone(&self.storage);
            async move { storage.upload_image(image.data, &image.content_type).await }
        }))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::VARIANT_SKU_REGEX;

    #[test]
    fn splices_color_code_into_product_sku() {
        assert_eq!(
            generate_variant_sku("Merah", "SEP-NIK-1042"),
            "SEP-NIK-MER-1042"
        );
    }

    #[test]
    fn strips_whitespace_from_color() {
        assert_eq!(
            generate_variant_sku("d a r k blue", "SEP-NIK-1042"),
            "SEP-NIK-DAR-1042"
        );
    }

    #[test]
    fn falls_back_on_malformed_product_sku() {
        assert_eq!(generate_variant_sku("Merah", "LEGACY42"), "GEN-LEGACY42-MER");
    }

    #[test]
    fn variant_skus_match_the_documented_format() {
        let sku = generate_variant_sku("Hitam", "RUN-ADI-0001");
        assert!(VARIANT_SKU_REGEX.is_match(&sku), "got '{}'", sku);
    }
}
