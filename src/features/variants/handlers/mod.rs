pub mod variant_handler;

pub use variant_handler::{
    __path_create_variant, __path_delete_inventory, __path_get_product_variants,
    __path_upsert_inventory, create_variant, delete_inventory, get_product_variants,
    upsert_inventory,
};
