//! Create Customer Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use caja_app::domain::customers::data::CustomerData;

use crate::{
    customers::models::{CustomerChangedResponse, CustomerRequest},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Create Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Create Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Customer created"),
    ),
)]
#[tracing::instrument(name = "customers.create", skip(json, depot, res), err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<CustomerRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CustomerChangedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.identity_or_401()?;
    let customer = CustomerData::try_from(json.into_inner())?;

    let id = state
        .customers
        .create_customer(customer, caller.user_id)
        .await
        .or_store_error("Error al crear cliente")?;

    tracing::info!(customer_id = %id, "created customer");

    res.status_code(StatusCode::CREATED);

    Ok(Json(CustomerChangedResponse::new(
        "Cliente creado",
        id.into_inner(),
    )))
}
