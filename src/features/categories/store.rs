use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;

/// Fields for inserting a category; `depth` comes from the service
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub image: Option<String>,
    pub parent_id: Option<Uuid>,
    pub depth: i32,
}

/// Mutable fields of a category; parent and depth are not among them
#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub name: String,
    pub description: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub image: Option<String>,
}

/// A category together with its immediate relations, as fetched in one shot
#[derive(Debug, Clone)]
pub struct CategorySnapshot {
    pub category: Category,
    pub parent: Option<Category>,
    pub children: Vec<Category>,
}

/// Data-access contract for the category hierarchy.
///
/// The service layer only talks to this trait, so the tree operations can be
/// exercised against an in-memory store in tests.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Insert one category, id assigned by the store
    async fn create(&self, fields: NewCategory) -> Result<Category>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>>;

    /// Fetch a category with its parent and first-level children attached
    async fn find_with_relations(&self, id: Uuid) -> Result<Option<CategorySnapshot>>;

    async fn find_by_parent_id(&self, parent_id: Uuid) -> Result<Vec<Category>>;

    /// All categories, ordered by ascending depth
    async fn find_all_by_depth(&self) -> Result<Vec<Category>>;

    /// Update a category, failing `NotFound` if it does not exist
    async fn update(&self, id: Uuid, fields: CategoryUpdate) -> Result<Category>;

    /// Delete a category, failing `NotFound` if it does not exist
    async fn delete(&self, id: Uuid) -> Result<Category>;
}

const CATEGORY_COLUMNS: &str =
    "id, name, description, meta_title, meta_description, image, parent_id, depth, created_at, updated_at";

/// Postgres-backed category store
pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn create(&self, fields: NewCategory) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            INSERT INTO categories (name, description, meta_title, meta_description, image, parent_id, depth)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&fields.meta_title)
        .bind(&fields.meta_description)
        .bind(&fields.image)
        .bind(fields.parent_id)
        .bind(fields.depth)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(category)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch category: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(category)
    }

    async fn find_with_relations(&self, id: Uuid) -> Result<Option<CategorySnapshot>> {
        let Some(category) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let parent = match category.parent_id {
            Some(parent_id) => self.find_by_id(parent_id).await?,
            None => None,
        };

        let children = self.find_by_parent_id(id).await?;

        Ok(Some(CategorySnapshot {
            category,
            parent,
            children,
        }))
    }

    async fn find_by_parent_id(&self, parent_id: Uuid) -> Result<Vec<Category>> {
        let children = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE parent_id = $1 ORDER BY created_at ASC"
        ))
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch child categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(children)
    }

    async fn find_all_by_depth(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY depth ASC, created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories)
    }

    async fn update(&self, id: Uuid, fields: CategoryUpdate) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            UPDATE categories
            SET name = $2,
                description = $3,
                meta_title = $4,
                meta_description = $5,
                image = $6,
                updated_at = now()
            WHERE id = $1
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&fields.meta_title)
        .bind(&fields.meta_description)
        .bind(&fields.image)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update category: {:?}", e);
            AppError::Database(e)
        })?;

        category.ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "DELETE FROM categories WHERE id = $1 RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete category: {:?}", e);
            AppError::Database(e)
        })?;

        category.ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }
}
