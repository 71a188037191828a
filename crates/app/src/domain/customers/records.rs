//! Customer Records

use crate::ids::TypedId;

/// Customer Record
pub struct CustomerRecord;

/// Customer Id
pub type CustomerId = TypedId<CustomerRecord>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub rfc: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
