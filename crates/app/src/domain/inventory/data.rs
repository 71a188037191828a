//! Inventory Data

use jiff::Timestamp;

use crate::domain::{inventory::records::MovementKind, products::records::ProductId};

/// Request to set a product's stock to an absolute quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAdjustment {
    pub product_id: ProductId,
    pub new_quantity: i64,
    pub note: Option<String>,
}

/// Stock before and after an adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustmentOutcome {
    pub previous_quantity: i32,
    pub new_quantity: i32,
    pub delta: i32,
}

/// Filters for the inventory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFilter {
    pub search: Option<String>,
}

/// Filters for the movement log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovementFilter {
    pub product_id: Option<ProductId>,
    pub kind: Option<MovementKind>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}
