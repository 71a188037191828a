//! Sale Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{auth::UserId, domain::customers::records::CustomerId, ids::TypedId};

/// Sale Record
pub struct SaleRecord;

/// Sale Id
pub type SaleId = TypedId<SaleRecord>;

/// A sale header with the names of its seller and customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleSummary {
    pub id: SaleId,
    pub customer_id: Option<CustomerId>,
    pub customer_name: Option<String>,
    pub user_id: UserId,
    pub user_name: Option<String>,
    pub sold_at: Timestamp,
    pub total: Decimal,
    pub payment_method: String,
}
