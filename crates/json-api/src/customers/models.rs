//! Customer Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use caja_app::domain::customers::{data::CustomerData, records::Customer};

use crate::errors::ApiError;

/// Customer Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CustomerRequest {
    #[serde(default)]
    pub nombre_cliente: Option<String>,
    #[serde(default)]
    pub rfc: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
}

impl TryFrom<CustomerRequest> for CustomerData {
    type Error = ApiError;

    fn try_from(request: CustomerRequest) -> Result<Self, Self::Error> {
        let Some(name) = request
            .nombre_cliente
            .filter(|name| !name.trim().is_empty())
        else {
            return Err(ApiError::bad_request("Falta nombre_cliente"));
        };

        Ok(CustomerData {
            name,
            rfc: request.rfc,
            email: request.correo,
            phone: request.telefono,
            address: request.direccion,
        })
    }
}

/// Customer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub id_cliente: i32,
    pub nombre_cliente: String,
    pub rfc: Option<String>,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id_cliente: customer.id.into_inner(),
            nombre_cliente: customer.name,
            rfc: customer.rfc,
            correo: customer.email,
            telefono: customer.phone,
            direccion: customer.address,
        }
    }
}

/// Customer Changed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerChangedResponse {
    pub mensaje: String,
    pub id_cliente: i32,
}

impl CustomerChangedResponse {
    pub(crate) fn new(mensaje: &str, id_cliente: i32) -> Self {
        Self {
            mensaje: mensaje.to_string(),
            id_cliente,
        }
    }
}
