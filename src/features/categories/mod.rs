//! Hierarchical product categories.
//!
//! Categories form a forest: every category optionally points at a parent
//! and carries a derived `depth` (0 for roots). The service owns the three
//! tree operations: depth assignment at creation, forest reconstruction
//! from the flat table, and cascading subtree deletion.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/category` | Yes | Create category (root or child) |
//! | GET | `/api/category` | Yes | Full category forest |
//! | PUT | `/api/category/{id}` | Yes | Update name/description/meta/image |
//! | DELETE | `/api/category/{id}` | Yes | Delete category and all descendants |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use services::CategoryService;
pub use store::{CategoryStore, PgCategoryStore};
