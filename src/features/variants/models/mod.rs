mod variant;

pub use variant::{Inventory, ProductImage, ProductVariant};
