//! Inventory

pub(crate) mod adjust;
pub(crate) mod index;
pub(crate) mod movements;

use caja_app::domain::inventory::InventoryServiceError;

use crate::errors::ApiError;

/// Map an inventory failure. `context` becomes the message of a 500.
pub(crate) fn into_api_error(context: &str, error: InventoryServiceError) -> ApiError {
    match error {
        InventoryServiceError::InvalidQuantity => {
            ApiError::bad_request("existencia_actual fuera de rango")
        }
        InventoryServiceError::ProductNotFound => ApiError::not_found("Producto no encontrado"),
        InventoryServiceError::Store(error) => ApiError::from_store(context, &error),
        other @ InventoryServiceError::Interrupted(_) => ApiError::internal(context, &other),
    }
}
