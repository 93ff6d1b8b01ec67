use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::variants::{dtos as variants_dtos, handlers as variants_handlers};
use crate::shared::constants::ACCESS_TOKEN_COOKIE;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::refresh_token,
        auth_handlers::logout,
        auth_handlers::get_profile,
        // Categories
        categories_handlers::create_category,
        categories_handlers::get_category_tree,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Products
        products_handlers::create_product,
        products_handlers::get_all_products,
        products_handlers::get_product,
        products_handlers::update_product,
        products_handlers::delete_product,
        // Variants
        variants_handlers::create_variant,
        variants_handlers::get_product_variants,
        variants_handlers::upsert_inventory,
        variants_handlers::delete_inventory,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth_dtos::RegisterDto,
            auth_dtos::LoginDto,
            auth_dtos::UserResponseDto,
            ApiResponse<auth_dtos::UserResponseDto>,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            categories_dtos::DeletedCategoryDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryTreeDto>>,
            ApiResponse<categories_dtos::DeletedCategoryDto>,
            // Products
            products_dtos::CreateProductDto,
            products_dtos::CreateProductRequest,
            products_dtos::CategorySummaryDto,
            products_dtos::ProductResponseDto,
            products_dtos::ProductWithCategoryDto,
            ApiResponse<products_dtos::ProductResponseDto>,
            ApiResponse<Vec<products_dtos::ProductWithCategoryDto>>,
            // Variants
            variants_dtos::CreateInventoryDto,
            variants_dtos::CreateVariantDto,
            variants_dtos::InventoryEntryDto,
            variants_dtos::UpsertInventoryDto,
            variants_dtos::ProductImageDto,
            variants_dtos::InventoryResponseDto,
            variants_dtos::VariantResponseDto,
            variants_dtos::VariantWithProductDto,
            ApiResponse<variants_dtos::VariantResponseDto>,
            ApiResponse<Vec<variants_dtos::VariantWithProductDto>>,
            ApiResponse<Vec<variants_dtos::InventoryResponseDto>>,
            ApiResponse<variants_dtos::InventoryResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Cookie-based authentication"),
        (name = "categories", description = "Hierarchical product categories"),
        (name = "products", description = "Product catalog"),
        (name = "variants", description = "Product variants, images and inventory"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Sepatuku API",
        version = "0.1.0",
        description = "API documentation for the Sepatuku catalog",
    )
)]
pub struct ApiDoc;

/// Adds the auth-cookie security scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(ACCESS_TOKEN_COOKIE))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
