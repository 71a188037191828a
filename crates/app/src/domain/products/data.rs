//! Products Data

use rust_decimal::Decimal;

use crate::domain::catalog::records::{BrandId, CategoryId};

/// Minimum stock assigned when none is given.
pub const DEFAULT_MINIMUM_STOCK: i32 = 5;

/// Writable product fields, used for both creation and full updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductData {
    pub code: String,
    pub name: String,
    pub sale_price: Decimal,
    pub purchase_price: Decimal,
    pub category_id: Option<CategoryId>,
    pub brand_id: Option<BrandId>,
    pub image_url: Option<String>,
    pub minimum_stock: i32,
    pub active: bool,
}
