use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/category",
            get(handlers::get_category_tree).post(handlers::create_category),
        )
        .route(
            "/api/category/{id}",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        .with_state(service)
}
