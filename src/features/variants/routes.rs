use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::variants::handlers;
use crate::features::variants::services::{InventoryService, VariantService};

/// Create routes for the variants feature
pub fn routes(
    variant_service: Arc<VariantService>,
    inventory_service: Arc<InventoryService>,
) -> Router {
    let variant_routes = Router::new()
        .route("/api/variants", post(handlers::create_variant))
        .route(
            "/api/variants/product/{id}",
            get(handlers::get_product_variants),
        )
        .with_state(variant_service);

    let inventory_routes = Router::new()
        .route(
            "/api/variants/{id}/inventory",
            put(handlers::upsert_inventory),
        )
        .route("/api/inventory/{id}", delete(handlers::delete_inventory))
        .with_state(inventory_service);

    variant_routes.merge(inventory_routes)
}
