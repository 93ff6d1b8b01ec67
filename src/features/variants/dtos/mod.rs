pub mod variant_dto;

pub use variant_dto::{
    CreateInventoryDto, CreateVariantDto, InventoryEntryDto, InventoryResponseDto,
    ProductImageDto, UpsertInventoryDto, VariantResponseDto, VariantWithProductDto,
};
