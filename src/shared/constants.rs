// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - full catalog management access
pub const ROLE_ADMIN: &str = "ADMIN";

/// Regular user role
#[allow(dead_code)]
pub const ROLE_USER: &str = "USER";

/// Registrations with this email are promoted to the admin role
pub const ADMIN_EMAIL: &str = "admin@admin.com";

// =============================================================================
// AUTH COOKIES
// =============================================================================

/// Cookie carrying the short-lived access token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Cookie carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

// =============================================================================
// SKU GENERATION
// =============================================================================

/// Number of characters taken from each name component of a SKU
pub const SKU_COMPONENT_LEN: usize = 3;

/// Storage folder for variant images
pub const VARIANT_IMAGE_FOLDER: &str = "product-variants";
