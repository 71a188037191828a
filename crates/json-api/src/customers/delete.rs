//! Delete Customer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use caja_app::domain::customers::records::CustomerRecord;

use crate::{
    customers::models::CustomerChangedResponse, errors::ApiError, extensions::*, state::State,
};

/// Delete Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Delete Customer",
    security(("bearer_auth" = [])),
)]
#[tracing::instrument(name = "customers.delete", skip(id, depot), err(Debug))]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CustomerChangedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.identity_or_401()?;
    let customer = id.into_id::<CustomerRecord>("ID de cliente inválido")?;

    state
        .customers
        .delete_customer(customer, caller.user_id)
        .await
        .or_store_error("Error al eliminar cliente")?;

    tracing::info!(customer_id = %customer, "deleted customer");

    Ok(Json(CustomerChangedResponse::new(
        "Cliente eliminado",
        customer.into_inner(),
    )))
}
