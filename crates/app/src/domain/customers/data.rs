//! Customers Data

/// Writable customer fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerData {
    pub name: String,
    pub rfc: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Filters for the customer listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub search: Option<String>,
}
