//! Result helper extensions for HTTP handlers.

use std::error::Error as StdError;

use caja_app::database::StoreError;

use crate::errors::ApiError;

/// Map service errors to API errors, logging server failures.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &str) -> Result<T, ApiError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: StdError + 'static,
{
    fn or_500(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|error| ApiError::internal(context, &error))
    }
}

/// Map storage errors by kind; only unexpected ones become a 500.
pub(crate) trait StoreResultExt<T> {
    fn or_store_error(self, context: &str) -> Result<T, ApiError>;
}

impl<T> StoreResultExt<T> for Result<T, StoreError> {
    fn or_store_error(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|error| ApiError::from_store(context, &error))
    }
}
