use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::products::dtos::{
    CreateProductDto, ProductResponseDto, ProductWithCategoryDto, ProductWithCategoryRow,
};
use crate::features::products::models::Product;
use crate::shared::constants::SKU_COMPONENT_LEN;

/// Generate a product SKU from category and product names plus a numeric
/// suffix: whitespace stripped, uppercased, first three characters of each.
///
/// `seq` comes from the `product_sku_seq` sequence, so two products sharing
/// the same name prefixes still get distinct SKUs.
pub fn generate_sku(category_name: &str, product_name: &str, seq: i64) -> String {
    format!(
        "{}-{}-{:04}",
        sanitize_component(category_name),
        sanitize_component(product_name),
        seq
    )
}

fn sanitize_component(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .take(SKU_COMPONENT_LEN)
        .collect::<String>()
        .to_uppercase()
}

/// Service for product operations
pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a product; the category check, SKU generation and insert share
    /// one transaction
    pub async fn create(&self, dto: CreateProductDto) -> Result<ProductResponseDto> {
        if dto.price <= Decimal::ZERO {
            return Err(AppError::Validation("Price must be positive".to_string()));
        }

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, meta_title, meta_description, image, parent_id, depth, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(dto.category_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::BadRequest("Category Not Found".to_string()))?;

        let seq = Self::next_sku_seq(&mut tx).await?;
        let sku = generate_sku(&category.name, &dto.name, seq);

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, sku, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, price, sku, category_id, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.price)
        .bind(&sku)
        .bind(dto.category_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(Self::map_sku_conflict)?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!("Product created: id={}, sku={}", product.id, product.sku);

        Ok(product.into())
    }

    /// All products with their category attached
    pub async fn get_all(&self) -> Result<Vec<ProductWithCategoryDto>> {
        let rows = sqlx::query_as::<_, ProductWithCategoryRow>(
            r#"
            SELECT p.id, p.name, p.description, p.price, p.sku, p.category_id,
                   p.created_at, p.updated_at,
                   c.name AS category_name,
                   c.description AS category_description,
                   c.image AS category_image
            FROM products p
            JOIN categories c ON c.id = p.category_id
            ORDER BY p.created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ProductResponseDto> {
        let product = self.find_by_id(id).await?;

        product
            .map(Into::into)
            .ok_or_else(|| AppError::BadRequest("Product Not Found".to_string()))
    }

    /// Update a product; the SKU is regenerated only when the name changed
    pub async fn update(&self, id: Uuid, dto: CreateProductDto) -> Result<ProductResponseDto> {
        if dto.price <= Decimal::ZERO {
            return Err(AppError::Validation("Price must be positive".to_string()));
        }

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, meta_title, meta_description, image, parent_id, depth, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(dto.category_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::BadRequest("Category Not Found".to_string()))?;

        let existing = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, sku, category_id, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::BadRequest("Product Not Found".to_string()))?;

        let sku = if dto.name != existing.name {
            let seq = Self::next_sku_seq(&mut tx).await?;
            generate_sku(&category.name, &dto.name, seq)
        } else {
            existing.sku
        };

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2,
                description = $3,
                price = $4,
                sku = $5,
                category_id = $6,
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, description, price, sku, category_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.price)
        .bind(&sku)
        .bind(dto.category_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(Self::map_sku_conflict)?;

        tx.commit().await.map_err(AppError::Database)?;

        Ok(product.into())
    }

    /// Delete a product; variants, their images and inventory cascade in the
    /// database
    pub async fn delete(&self, id: Uuid) -> Result<ProductResponseDto> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            DELETE FROM products
            WHERE id = $1
            RETURNING id, name, description, price, sku, category_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete product: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        tracing::info!("Product deleted: id={}, sku={}", product.id, product.sku);

        Ok(product.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
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
            tracing::error!("Failed to fetch product: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn next_sku_seq(tx: &mut sqlx::Transaction<'_, sqlx::Postgres>) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT nextval('product_sku_seq')")
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to advance SKU sequence: {:?}", e);
                AppError::Database(e)
            })
    }

    fn map_sku_conflict(e: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(ref db) = e {
            if db.is_unique_violation() {
                return AppError::BadRequest("A product with this SKU already exists".to_string());
            }
        }
        tracing::error!("Failed to write product: {:?}", e);
        AppError::Database(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::PRODUCT_SKU_REGEX;

    #[test]
    fn generates_sku_from_name_prefixes() {
        assert_eq!(generate_sku("Sepatu", "Nike Air", 1042), "SEP-NIK-1042");
    }

    #[test]
    fn strips_whitespace_before_truncating() {
        // "R u" would otherwise truncate into a spaced prefix
        assert_eq!(generate_sku("R u n", "A B C D", 7), "RUN-ABC-0007");
    }

    #[test]
    fn pads_short_sequence_numbers() {
        assert_eq!(generate_sku("Boots", "Hiker", 3), "BOO-HIK-0003");
    }

    #[test]
    fn keeps_long_sequence_numbers_intact() {
        assert_eq!(generate_sku("Boots", "Hiker", 123456), "BOO-HIK-123456");
    }

    #[test]
    fn handles_short_names() {
        assert_eq!(generate_sku("X", "Go", 42), "X-GO-0042");
    }

    #[test]
    fn generated_skus_match_the_documented_format() {
        for (cat, prod, seq) in [
            ("Sepatu", "Nike Air", 1000),
            ("Running", "Adidas Ultra", 9999),
            ("b o o t s", "hiking pro", 12345),
        ] {
            let sku = generate_sku(cat, prod, seq);
            assert!(
                PRODUCT_SKU_REGEX.is_match(&sku),
                "SKU '{}' should match format",
                sku
            );
        }
    }
}
