use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::variants::dtos::{InventoryEntryDto, InventoryResponseDto};
use crate::features::variants::models::{Inventory, ProductVariant};

/// Service for per-size inventory of a variant
pub struct InventoryService {
    pool: PgPool,
}

impl InventoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create or update inventory entries for a variant in one transaction.
    ///
    /// Entries carrying an id are updated, the rest inserted. Returns the
    /// variant's full inventory afterwards.
    pub async fn create_or_update(
        &self,
        variant_id: Uuid,
        entries: Vec<InventoryEntryDto>,
    ) -> Result<Vec<InventoryResponseDto>> {
        let variant = sqlx::query_as::<_, ProductVariant>(
            r#"
            SELECT id, product_id, color, sku, created_at, updated_at
            FROM product_variants
            WHERE id = $1
            "#,
        )
        .bind(variant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch variant for inventory upsert: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::BadRequest("Variant Not Found".to_string()))?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        for entry in &entries {
            match entry.id {
                Some(id) => {
                    let updated = sqlx::query_as::<_, Inventory>(
                        r#"
                        UPDATE inventory
                        SET size = $2,
                            stock = $3,
                            available_stock = $4,
                            updated_at = now()
                        WHERE id = $1 AND variant_id = $5
                        RETURNING id, variant_id, size, stock, available_stock, created_at, updated_at
                        "#,
                    )
                    .bind(id)
                    .bind(&entry.size)
                    .bind(entry.stock)
                    .bind(entry.available_stock)
                    .bind(variant.id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::Database)?;

                    if updated.is_none() {
                        return Err(AppError::NotFound(format!(
                            "Inventory entry '{}' not found",
                            id
                        )));
                    }
                }
                None => {
                    sqlx::query(
                        r#"
                        INSERT INTO inventory (variant_id, size, stock, available_stock)
                        VALUES ($1, $2, $3, $4)
                        "#,
                    )
                    .bind(variant.id)
                    .bind(&entry.size)
                    .bind(entry.stock)
                    .bind(entry.available_stock)
                    .execute(&mut *tx)
                    .await
                    .map_err(AppError::Database)?;
                }
            }
        }

        tx.commit().await.map_err(AppError::Database)?;

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

        tracing::info!(
            "Inventory upserted: variant={}, entries={}",
            variant.id,
            entries.len()
        );

        Ok(inventory.into_iter().map(Into::into).collect())
    }

    /// Delete one inventory entry
    pub async fn delete(&self, id: Uuid) -> Result<InventoryResponseDto> {
        let deleted = sqlx::query_as::<_, Inventory>(
            r#"
            DELETE FROM inventory
            WHERE id = $1
            RETURNING id, variant_id, size, stock, available_stock, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete inventory entry: {:?}", e);
            AppError::Database(e)
        })?;

        deleted
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Inventory entry not found".to_string()))
    }
}
