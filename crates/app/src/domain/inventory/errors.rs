//! Inventory service errors.

use thiserror::Error;
use tokio::task::JoinError;

use crate::database::StoreError;

#[derive(Debug, Error)]
pub enum InventoryServiceError {
    #[error("quantity does not fit a stock value")]
    InvalidQuantity,

    #[error("product not found")]
    ProductNotFound,

    #[error("stock adjustment task did not complete")]
    Interrupted(#[from] JoinError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for InventoryServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::ProductNotFound,
            other => Self::Store(other),
        }
    }
}

impl From<sqlx::Error> for InventoryServiceError {
    fn from(error: sqlx::Error) -> Self {
        StoreError::from(error).into()
    }
}
