//! Suppliers

pub(crate) mod create;
pub(crate) mod index;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use caja_app::domain::suppliers::records::Supplier;

/// Supplier Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SupplierResponse {
    pub id_proveedor: i32,
    pub nombre_proveedor: String,
    pub rfc: Option<String>,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
}

impl From<Supplier> for SupplierResponse {
    fn from(supplier: Supplier) -> Self {
        Self {
            id_proveedor: supplier.id.into_inner(),
            nombre_proveedor: supplier.name,
            rfc: supplier.rfc,
            correo: supplier.email,
            telefono: supplier.phone,
            direccion: supplier.address,
        }
    }
}
