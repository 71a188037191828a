//! Purchase Entry Records

use rust_decimal::Decimal;

use crate::{
    domain::{products::records::ProductId, suppliers::records::SupplierId},
    ids::TypedId,
};

/// Entry Record
pub struct EntryRecord;

/// Entry Id
pub type EntryId = TypedId<EntryRecord>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLine {
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_cost: Decimal,
    pub unit_price: Option<Decimal>,
}

/// Goods received from a supplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub supplier_id: Option<SupplierId>,
    pub total: Decimal,
    pub lines: Vec<EntryLine>,
}
