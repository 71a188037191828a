//! Supplier Records

use crate::ids::TypedId;

/// Supplier Record
pub struct SupplierRecord;

/// Supplier Id
pub type SupplierId = TypedId<SupplierRecord>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub rfc: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
