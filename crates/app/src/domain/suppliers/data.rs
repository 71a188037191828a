//! Suppliers Data

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierData {
    pub name: String,
    pub rfc: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierFilter {
    pub search: Option<String>,
}
