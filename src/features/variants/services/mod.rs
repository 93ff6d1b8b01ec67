mod inventory_service;
mod variant_service;

pub use inventory_service::InventoryService;
pub use variant_service::{UploadedImage, VariantService};
