//! Update Customer Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use caja_app::domain::customers::{data::CustomerData, records::CustomerRecord};

use crate::{
    customers::models::{CustomerChangedResponse, CustomerRequest},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Update Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Update Customer",
    security(("bearer_auth" = [])),
)]
#[tracing::instrument(name = "customers.update", skip(id, json, depot), err(Debug))]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<CustomerRequest>,
    depot: &mut Depot,
) -> Result<Json<CustomerChangedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.identity_or_401()?;
    let customer = id.into_id::<CustomerRecord>("ID de cliente inválido")?;
    let data = CustomerData::try_from(json.into_inner())?;

    state
        .customers
        .update_customer(customer, data, caller.user_id)
        .await
        .or_store_error("Error al actualizar cliente")?;

    Ok(Json(CustomerChangedResponse::new(
        "Cliente actualizado",
        customer.into_inner(),
    )))
}
