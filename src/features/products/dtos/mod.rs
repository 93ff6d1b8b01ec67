pub mod product_dto;

pub use product_dto::{
    CategorySummaryDto, CreateProductDto, CreateProductRequest, ProductResponseDto,
    ProductWithCategoryDto, ProductWithCategoryRow,
};
