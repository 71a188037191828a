//! Path id parsing.

use salvo::oapi::extract::PathParam;

use caja_app::ids::TypedId;

use crate::errors::ApiError;

pub(crate) trait PathIdExt {
    /// Parse a positive integer id, answering 400 with `message` otherwise.
    fn into_id<T>(self, message: &str) -> Result<TypedId<T>, ApiError>;
}

impl PathIdExt for PathParam<String> {
    fn into_id<T>(self, message: &str) -> Result<TypedId<T>, ApiError> {
        self.into_inner()
            .parse::<i32>()
            .ok()
            .filter(|id| *id > 0)
            .map(TypedId::new)
            .ok_or_else(|| ApiError::bad_request(message))
    }
}
