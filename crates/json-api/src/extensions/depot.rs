//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;

use caja_app::auth::Identity;

use crate::errors::ApiError;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn insert_identity(&mut self, identity: Identity);

    /// The caller verified by the auth hoop.
    fn identity_or_401(&self) -> Result<&Identity, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>()
            .map_err(|_ignored| ApiError::internal_message("Error en el servidor"))
    }

    fn insert_identity(&mut self, identity: Identity) {
        self.inject(identity);
    }

    fn identity_or_401(&self) -> Result<&Identity, ApiError> {
        self.obtain::<Identity>()
            .map_err(|_ignored| ApiError::unauthorized("Acceso denegado. No se proporcionó token."))
    }
}
