use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::products::services::generate_sku;

/// One row of the catalog CSV export (Indonesian column headers)
#[derive(Debug, Deserialize)]
struct CsvProductRow {
    #[serde(rename = "Judul")]
    title: String,
    #[serde(rename = "Harga")]
    price: String,
}

/// Parse an Indonesian-formatted price string like `Rp 1.299.000`.
///
/// Unparseable values become zero, which the seeder then skips.
fn parse_price(raw: &str) -> Decimal {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("Rp")
        .trim()
        .chars()
        .filter(|c| *c != '.')
        .collect();

    cleaned.parse().unwrap_or(Decimal::ZERO)
}

/// Seeds products into a category from a CSV catalog export
pub struct ProductSeeder {
    pool: PgPool,
}

impl ProductSeeder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Seed products from the CSV at `path` into the given category.
    ///
    /// Rows with an empty title or a zero price are skipped. All inserts
    /// share one transaction, so a malformed file leaves nothing behind.
    pub async fn seed_from_csv(&self, path: &str, category_id: Uuid) -> Result<usize> {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| AppError::Internal(format!("Failed to open seed CSV '{}': {}", path, e)))?;

        let rows: Vec<CsvProductRow> = reader
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| AppError::Internal(format!("Failed to parse seed CSV: {}", e)))?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, meta_title, meta_description, image, parent_id, depth, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(category_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| {
            AppError::NotFound(format!("Category with ID {} not found", category_id))
        })?;

        let mut seeded = 0usize;
        for row in rows {
            let name = row.title.trim();
            let price = parse_price(&row.price);

            if name.is_empty() || price == Decimal::ZERO {
                continue;
            }

            let seq = sqlx::query_scalar::<_, i64>("SELECT nextval('product_sku_seq')")
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::Database)?;

            sqlx::query(
                r#"
                INSERT INTO products (name, description, price, sku, category_id)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(name)
            .bind(format!("{} - Men's Shoe", name))
            .bind(price)
            .bind(generate_sku(&category.name, name, seq))
            .bind(category.id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

            seeded += 1;
        }

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Seeded {} products into category '{}'",
            seeded,
            category.name
        );

        Ok(seeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_indonesian_price_format() {
        assert_eq!(parse_price("Rp 1.299.000"), Decimal::from(1_299_000));
        assert_eq!(parse_price("Rp 850.000"), Decimal::from(850_000));
    }

    #[test]
    fn parses_bare_numbers() {
        assert_eq!(parse_price("42000"), Decimal::from(42_000));
    }

    #[test]
    fn unparseable_prices_become_zero() {
        assert_eq!(parse_price(""), Decimal::ZERO);
        assert_eq!(parse_price("gratis"), Decimal::ZERO);
        assert_eq!(parse_price("Rp"), Decimal::ZERO);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(parse_price("  Rp 99.900  "), Decimal::from(99_900));
    }
}
