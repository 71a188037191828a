//! Sales Data

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{customers::records::CustomerId, products::records::ProductId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleLine {
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub unit_cost: Decimal,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub customer_id: Option<CustomerId>,
    pub total: Decimal,
    pub payment_method: String,
    pub lines: Vec<SaleLine>,
}

/// Filters for the sales history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleFilter {
    pub customer_id: Option<CustomerId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}
