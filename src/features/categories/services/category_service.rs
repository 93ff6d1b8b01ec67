use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, DeletedCategoryDto,
};
use crate::features::categories::store::{CategoryStore, CategoryUpdate, NewCategory};

/// Service for category hierarchy operations
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }

    /// Create a category, deriving its depth from the parent
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let depth = self.assign_depth(dto.parent_id).await?;

        tracing::info!("Creating category with depth: {}", depth);

        let category = self
            .store
            .create(NewCategory {
                name: dto.name,
                description: dto.description,
                meta_title: dto.meta_title,
                meta_description: dto.meta_description,
                image: dto.image,
                parent_id: dto.parent_id,
                depth,
            })
            .await?;

        Ok(category.into())
    }

    /// Depth of a new category: 0 for roots, one below the parent otherwise
    pub async fn assign_depth(&self, parent_id: Option<Uuid>) -> Result<i32> {
        let Some(parent_id) = parent_id else {
            return Ok(0);
        };

        let parent = self
            .store
            .find_by_id(parent_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Parent category not found".to_string()))?;

        Ok(parent.depth + 1)
    }

    /// The full category forest, reconstructed from the flat table
    pub async fn tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let categories = self.store.find_all_by_depth().await?;
        Ok(CategoryTreeDto::build_forest(categories))
    }

    /// Update name/description/meta/image. A `parentId` in the body is
    /// ignored: reparenting would invalidate the stored depths.
    pub async fn update(&self, id: Uuid, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        let updated = self
            .store
            .update(
                existing.id,
                CategoryUpdate {
                    name: dto.name,
                    description: dto.description,
                    meta_title: dto.meta_title,
                    meta_description: dto.meta_description,
                    image: dto.image,
                },
            )
            .await?;

        Ok(updated.into())
    }

    /// Delete a category together with its entire descendant subtree.
    ///
    /// Returns the pre-deletion snapshot (first-level children and parent
    /// only). Descendants are removed strictly before their ancestors; the
    /// walk re-queries children at every node, so rows inserted after the
    /// snapshot are still picked up. The cascade is not transactional: a
    /// failure mid-walk leaves the already-deleted part gone.
    pub async fn delete_subtree(&self, id: Uuid) -> Result<DeletedCategoryDto> {
        let snapshot = self
            .store
            .find_with_relations(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        if snapshot.children.is_empty() {
            self.store.delete(id).await?;
            return Ok(snapshot.into());
        }

        // Explicit worklist instead of recursion, so arbitrarily deep
        // hierarchies cannot exhaust the stack. The walk records nodes in
        // preorder; deleting in reverse removes every descendant before its
        // ancestor.
        let mut order: Vec<Uuid> = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            let children = self.store.find_by_parent_id(current).await?;
            stack.extend(children.iter().map(|c| c.id));
        }

        for node in order.iter().rev() {
            self.store.delete(*node).await?;
        }

        tracing::info!(
            "Deleted category subtree: root={}, nodes={}",
            id,
            order.len()
        );

        Ok(snapshot.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::Category;
    use crate::features::categories::store::CategorySnapshot;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    /// In-memory store: insertion-ordered rows plus a deletion log
    #[derive(Default)]
    struct InMemoryStore {
        rows: Mutex<Vec<Category>>,
        deletions: Mutex<Vec<Uuid>>,
    }

    impl InMemoryStore {
        fn deletion_log(&self) -> Vec<Uuid> {
            self.deletions.lock().unwrap().clone()
        }

        fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CategoryStore for InMemoryStore {
        async fn create(&self, fields: NewCategory) -> Result<Category> {
            let category = Category {
                id: Uuid::new_v4(),
                name: fields.name,
                description: fields.description,
                meta_title: fields.meta_title,
                meta_description: fields.meta_description,
                image: fields.image,
                parent_id: fields.parent_id,
                depth: fields.depth,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(category.clone());
            Ok(category)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == id)
                .cloned())
        }

        async fn find_with_relations(&self, id: Uuid) -> Result<Option<CategorySnapshot>> {
            let Some(category) = self.find_by_id(id).await? else {
                return Ok(None);
            };
            let parent = match category.parent_id {
                Some(pid) => self.find_by_id(pid).await?,
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
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.parent_id == Some(parent_id))
                .cloned()
                .collect())
        }

        async fn find_all_by_depth(&self) -> Result<Vec<Category>> {
            let mut all = self.rows.lock().unwrap().clone();
            all.sort_by_key(|c| c.depth);
            Ok(all)
        }

        async fn update(&self, id: Uuid, fields: CategoryUpdate) -> Result<Category> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;
            row.name = fields.name;
            row.description = fields.description;
            row.meta_title = fields.meta_title;
            row.meta_description = fields.meta_description;
            row.image = fields.image;
            row.updated_at = Utc::now();
            Ok(row.clone())
        }

        async fn delete(&self, id: Uuid) -> Result<Category> {
            let mut rows = self.rows.lock().unwrap();
            let pos = rows
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;
            let removed = rows.remove(pos);
            self.deletions.lock().unwrap().push(id);
            Ok(removed)
        }
    }

    fn service() -> (CategoryService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::default());
        (CategoryService::new(store.clone()), store)
    }

    fn dto(name: &str, parent_id: Option<Uuid>) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            description: format!("{} shoes", name),
            meta_title: None,
            meta_description: None,
            image: None,
            parent_id,
        }
    }

    #[tokio::test]
    async fn assigns_depth_zero_to_roots() {
        let (service, _) = service();
        assert_eq!(service.assign_depth(None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn assigns_depth_below_parent() {
        let (service, _) = service();
        let root = service.create(dto("sneakers", None)).await.unwrap();
        let child = service
            .create(dto("running", Some(root.id)))
            .await
            .unwrap();
        let grandchild = service
            .create(dto("trail", Some(child.id)))
            .await
            .unwrap();

        assert_eq!(root.depth, 0);
        assert_eq!(child.depth, 1);
        assert_eq!(grandchild.depth, 2);
    }

    #[tokio::test]
    async fn assigning_depth_under_unknown_parent_fails_not_found() {
        let (service, _) = service();
        let result = service.assign_depth(Some(Uuid::new_v4())).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_with_unknown_parent_fails_not_found() {
        let (service, store) = service();

        let result = service.create(dto("orphan", Some(Uuid::new_v4()))).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn tree_reflects_created_hierarchy() {
        let (service, _) = service();
        let root = service.create(dto("sneakers", None)).await.unwrap();
        let child = service
            .create(dto("running", Some(root.id)))
            .await
            .unwrap();

        let forest = service.tree().await.unwrap();

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, root.id);
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].id, child.id);
    }

    #[tokio::test]
    async fn update_ignores_parent_id() {
        let (service, store) = service();
        let root = service.create(dto("sneakers", None)).await.unwrap();
        let other = service.create(dto("boots", None)).await.unwrap();
        let child = service
            .create(dto("running", Some(root.id)))
            .await
            .unwrap();

        let mut update = dto("road running", Some(other.id));
        update.image = Some("https://img.example/road.jpg".to_string());
        let updated = service.update(child.id, update).await.unwrap();

        assert_eq!(updated.name, "road running");
        assert_eq!(updated.image.as_deref(), Some("https://img.example/road.jpg"));
        // still under the original parent, depth untouched
        assert_eq!(updated.parent_id, Some(root.id));
        assert_eq!(updated.depth, 1);
        assert_eq!(store.deletion_log().len(), 0);
    }

    #[tokio::test]
    async fn update_unknown_category_fails_not_found() {
        let (service, _) = service();
        let result = service.update(Uuid::new_v4(), dto("x", None)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn deleting_leaf_performs_exactly_one_deletion() {
        let (service, store) = service();
        let leaf = service.create(dto("sneakers", None)).await.unwrap();

        let snapshot = service.delete_subtree(leaf.id).await.unwrap();

        assert_eq!(store.deletion_log(), vec![leaf.id]);
        assert!(snapshot.children.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn deletes_chain_in_postorder_with_first_level_snapshot() {
        let (service, store) = service();
        let a = service.create(dto("a", None)).await.unwrap();
        let b = service.create(dto("b", Some(a.id))).await.unwrap();
        let c = service.create(dto("c", Some(b.id))).await.unwrap();

        let snapshot = service.delete_subtree(a.id).await.unwrap();

        assert_eq!(store.deletion_log(), vec![c.id, b.id, a.id]);
        // snapshot carries only the first level: B, not C
        let child_ids: Vec<Uuid> = snapshot.children.iter().map(|c| c.id).collect();
        assert_eq!(child_ids, vec![b.id]);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn deletes_every_descendant_before_its_ancestor() {
        let (service, store) = service();
        let root = service.create(dto("root", None)).await.unwrap();
        let left = service.create(dto("left", Some(root.id))).await.unwrap();
        let right = service.create(dto("right", Some(root.id))).await.unwrap();
        let ll = service.create(dto("ll", Some(left.id))).await.unwrap();
        let lr = service.create(dto("lr", Some(left.id))).await.unwrap();
        let rl = service.create(dto("rl", Some(right.id))).await.unwrap();

        service.delete_subtree(root.id).await.unwrap();

        let log = store.deletion_log();
        assert_eq!(log.len(), 6);
        assert_eq!(store.len(), 0);

        let pos = |id: Uuid| log.iter().position(|&d| d == id).unwrap();
        for (child, parent) in [
            (left.id, root.id),
            (right.id, root.id),
            (ll.id, left.id),
            (lr.id, left.id),
            (rl.id, right.id),
        ] {
            assert!(pos(child) < pos(parent), "descendant must go first");
        }
    }

    #[tokio::test]
    async fn deleting_subtree_spares_unrelated_categories() {
        let (service, store) = service();
        let doomed = service.create(dto("doomed", None)).await.unwrap();
        let _child = service.create(dto("child", Some(doomed.id))).await.unwrap();
        let survivor = service.create(dto("survivor", None)).await.unwrap();

        service.delete_subtree(doomed.id).await.unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.find_by_id(survivor.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleting_unknown_id_fails_with_zero_deletions() {
        let (service, store) = service();
        service.create(dto("sneakers", None)).await.unwrap();

        let result = service.delete_subtree(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(store.deletion_log().len(), 0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn deletion_snapshot_includes_parent() {
        let (service, _) = service();
        let root = service.create(dto("root", None)).await.unwrap();
        let child = service.create(dto("child", Some(root.id))).await.unwrap();

        let snapshot = service.delete_subtree(child.id).await.unwrap();

        assert_eq!(snapshot.parent.as_ref().map(|p| p.id), Some(root.id));
    }
}
