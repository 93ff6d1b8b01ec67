//! Product variants with images and per-size inventory.
//!
//! A variant is one color of a product; it carries uploaded images (the
//! first one flagged as main) and stock entries per size. Variant SKUs
//! splice a color code into the product SKU.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/variants` | Yes | Create variant (multipart: payload + images) |
//! | GET | `/api/variants/product/{id}` | Yes | Variants of a product |
//! | PUT | `/api/variants/{id}/inventory` | Yes | Create or update inventory entries |
//! | DELETE | `/api/inventory/{id}` | Yes | Delete one inventory entry |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{InventoryService, VariantService};
