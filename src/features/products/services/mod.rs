mod product_service;

pub use product_service::{generate_sku, ProductService};
