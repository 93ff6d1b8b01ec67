use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::features::categories::store::CategorySnapshot;

/// Request DTO for creating or updating a category.
///
/// On update, `parentId` is accepted but has no effect: reparenting is
/// unsupported because `depth` is only computed at creation time.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub image: Option<String>,
    pub parent_id: Option<Uuid>,
}

/// Response DTO for a single category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub image: Option<String>,
    pub parent_id: Option<Uuid>,
    pub depth: i32,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            meta_title: c.meta_title,
            meta_description: c.meta_description,
            image: c.image,
            parent_id: c.parent_id,
            depth: c.depth,
        }
    }
}

/// Response DTO for the deletion snapshot: the category as it was before the
/// cascade, with only its first-level relations attached
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCategoryDto {
    #[serde(flatten)]
    pub category: CategoryResponseDto,
    pub parent: Option<CategoryResponseDto>,
    pub children: Vec<CategoryResponseDto>,
}

impl From<CategorySnapshot> for DeletedCategoryDto {
    fn from(s: CategorySnapshot) -> Self {
        Self {
            category: s.category.into(),
            parent: s.parent.map(Into::into),
            children: s.children.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response DTO for a node of the category forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub image: Option<String>,
    pub parent_id: Option<Uuid>,
    pub depth: i32,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    fn leaf(c: &Category) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone(),
            meta_title: c.meta_title.clone(),
            meta_description: c.meta_description.clone(),
            image: c.image.clone(),
            parent_id: c.parent_id,
            depth: c.depth,
            children: Vec::new(),
        }
    }

    /// Reconstruct the parent/children forest from a flat category list.
    ///
    /// The input is sorted by depth here rather than trusting the caller's
    /// ordering; the sort is stable, so sibling order (and root order) still
    /// follows the input. Two linear passes, no recursion.
    ///
    /// A `parent_id` that cannot be placed before its child even after the
    /// sort (unknown id, or corrupt depth data) promotes the child to a root
    /// instead of erroring.
    pub fn build_forest(mut categories: Vec<Category>) -> Vec<CategoryTreeDto> {
        categories.sort_by_key(|c| c.depth);

        let index: HashMap<Uuid, usize> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect();

        // First pass: link each node to its parent by index. With correct
        // depth data a parent always sorts before its child, so the guard
        // `p < i` only trips on inconsistent rows.
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); categories.len()];
        let mut roots: Vec<usize> = Vec::new();
        for (i, category) in categories.iter().enumerate() {
            match category.parent_id.and_then(|p| index.get(&p).copied()) {
                Some(p) if p < i => children[p].push(i),
                _ => roots.push(i),
            }
        }

        // Second pass, deepest-first: every child sits at a higher index than
        // its parent, so walking indices in reverse completes each subtree
        // before its parent collects it.
        let mut nodes: Vec<Option<CategoryTreeDto>> =
            categories.iter().map(|c| Some(Self::leaf(c))).collect();
        for i in (0..categories.len()).rev() {
            let kids: Vec<CategoryTreeDto> = children[i]
                .iter()
                .filter_map(|&j| nodes[j].take())
                .collect();
            if let Some(node) = nodes[i].as_mut() {
                node.children = kids;
            }
        }

        roots.into_iter().filter_map(|i| nodes[i].take()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(id: Uuid, parent_id: Option<Uuid>, depth: i32, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            description: format!("{} shoes", name),
            meta_title: None,
            meta_description: None,
            image: None,
            parent_id,
            depth,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn builds_chain_of_three() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let input = vec![
            category(a, None, 0, "a"),
            category(b, Some(a), 1, "b"),
            category(c, Some(b), 2, "c"),
        ];

        let forest = CategoryTreeDto::build_forest(input);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, a);
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].id, b);
        assert_eq!(forest[0].children[0].children.len(), 1);
        assert_eq!(forest[0].children[0].children[0].id, c);
        assert!(forest[0].children[0].children[0].children.is_empty());
    }

    #[test]
    fn preserves_sibling_and_root_order() {
        let r1 = Uuid::new_v4();
        let r2 = Uuid::new_v4();
        let c1 = Uuid::new_v4();
        let c2 = Uuid::new_v4();
        let c3 = Uuid::new_v4();
        let input = vec![
            category(r1, None, 0, "sneakers"),
            category(r2, None, 0, "boots"),
            category(c1, Some(r1), 1, "running"),
            category(c2, Some(r1), 1, "casual"),
            category(c3, Some(r2), 1, "hiking"),
        ];

        let forest = CategoryTreeDto::build_forest(input);

        let root_ids: Vec<Uuid> = forest.iter().map(|n| n.id).collect();
        assert_eq!(root_ids, vec![r1, r2]);

        let child_ids: Vec<Uuid> = forest[0].children.iter().map(|n| n.id).collect();
        assert_eq!(child_ids, vec![c1, c2]);
        assert_eq!(forest[1].children.len(), 1);
        assert_eq!(forest[1].children[0].id, c3);
    }

    #[test]
    fn every_placed_child_matches_its_parent_id() {
        let ids: Vec<Uuid> = (0..6).map(|_| Uuid::new_v4()).collect();
        let input = vec![
            category(ids[0], None, 0, "a"),
            category(ids[1], Some(ids[0]), 1, "b"),
            category(ids[2], Some(ids[0]), 1, "c"),
            category(ids[3], Some(ids[1]), 2, "d"),
            category(ids[4], Some(ids[2]), 2, "e"),
            category(ids[5], None, 0, "f"),
        ];

        let forest = CategoryTreeDto::build_forest(input);

        fn check(node: &CategoryTreeDto) {
            for child in &node.children {
                assert_eq!(child.parent_id, Some(node.id));
                check(child);
            }
        }
        for root in &forest {
            assert!(root.parent_id.is_none());
            check(root);
        }
    }

    #[test]
    fn is_idempotent() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let input = vec![category(a, None, 0, "a"), category(b, Some(a), 1, "b")];

        let first = CategoryTreeDto::build_forest(input.clone());
        let second = CategoryTreeDto::build_forest(input);

        assert_eq!(first, second);
    }

    #[test]
    fn sorts_unordered_input_by_depth() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        // child rows delivered before their parents
        let input = vec![
            category(c, Some(b), 2, "c"),
            category(b, Some(a), 1, "b"),
            category(a, None, 0, "a"),
        ];

        let forest = CategoryTreeDto::build_forest(input);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, a);
        assert_eq!(forest[0].children[0].id, b);
        assert_eq!(forest[0].children[0].children[0].id, c);
    }

    #[test]
    fn unknown_parent_promotes_child_to_root() {
        let a = Uuid::new_v4();
        let orphan = Uuid::new_v4();
        let input = vec![
            category(a, None, 0, "a"),
            category(orphan, Some(Uuid::new_v4()), 1, "orphan"),
        ];

        let forest = CategoryTreeDto::build_forest(input);

        let root_ids: Vec<Uuid> = forest.iter().map(|n| n.id).collect();
        assert_eq!(root_ids, vec![a, orphan]);
        assert!(forest[1].children.is_empty());
    }

    #[test]
    fn corrupt_depth_promotes_child_to_root() {
        let parent = Uuid::new_v4();
        let child = Uuid::new_v4();
        // parent claims a greater depth than its child; the link cannot be
        // trusted, so the child becomes a root
        let input = vec![
            category(child, Some(parent), 0, "child"),
            category(parent, None, 5, "parent"),
        ];

        let forest = CategoryTreeDto::build_forest(input);

        assert_eq!(forest.len(), 2);
        assert!(forest.iter().any(|n| n.id == child && n.children.is_empty()));
    }

    #[test]
    fn empty_input_builds_empty_forest() {
        assert!(CategoryTreeDto::build_forest(Vec::new()).is_empty());
    }
}
