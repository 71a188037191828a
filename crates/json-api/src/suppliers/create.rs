//! Create Supplier Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use caja_app::domain::suppliers::data::SupplierData;

use crate::{errors::ApiError, extensions::*, state::State};

/// Supplier Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct SupplierRequest {
    #[serde(default)]
    pub nombre_proveedor: Option<String>,
    #[serde(default)]
    pub rfc: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
}

impl TryFrom<SupplierRequest> for SupplierData {
    type Error = ApiError;

    fn try_from(request: SupplierRequest) -> Result<Self, Self::Error> {
        let Some(name) = request
            .nombre_proveedor
            .filter(|name| !name.trim().is_empty())
        else {
            return Err(ApiError::bad_request("Falta nombre_proveedor"));
        };

        Ok(SupplierData {
            name,
            rfc: request.rfc,
            email: request.correo,
            phone: request.telefono,
            address: request.direccion,
        })
    }
}

/// Supplier Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SupplierCreatedResponse {
    pub mensaje: String,
    pub id_proveedor: i32,
}

/// Create Supplier Handler
#[endpoint(
    tags("suppliers"),
    summary = "Create Supplier",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Supplier created"),
    ),
)]
#[tracing::instrument(name = "suppliers.create", skip(json, depot, res), err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<SupplierRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SupplierCreatedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let supplier = SupplierData::try_from(json.into_inner())?;

    let id = state
        .suppliers
        .create_supplier(supplier)
        .await
        .or_store_error("Error al crear proveedor")?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(SupplierCreatedResponse {
        mensaje: "Proveedor creado".to_string(),
        id_proveedor: id.into_inner(),
    }))
}
