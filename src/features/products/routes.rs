use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Create routes for the products feature
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            "/api/product",
            get(handlers::get_all_products).post(handlers::create_product),
        )
        .route(
            "/api/product/{id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .with_state(service)
}
