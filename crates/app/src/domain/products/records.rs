//! Product Records

use rust_decimal::Decimal;

use crate::{
    domain::catalog::records::{BrandId, CategoryId},
    ids::TypedId,
};

/// Product Record
pub struct ProductRecord;

/// Product Id
pub type ProductId = TypedId<ProductRecord>;

/// A product with its current stock, when it has a stock row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub code: String,
    pub name: String,
    pub sale_price: Decimal,
    pub purchase_price: Decimal,
    pub category_id: Option<CategoryId>,
    pub brand_id: Option<BrandId>,
    pub image_url: Option<String>,
    pub minimum_stock: i32,
    pub active: bool,
    pub stock: Option<i32>,
}
