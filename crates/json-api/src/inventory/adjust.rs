//! Adjust Stock Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use caja_app::domain::{inventory::data::StockAdjustment, products::records::ProductRecord};

use crate::{errors::ApiError, extensions::*, inventory::into_api_error, state::State};

/// Adjust Stock Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct AdjustStockRequest {
    /// New absolute stock; must be an integer
    #[serde(default)]
    #[salvo(schema(value_type = i64))]
    pub existencia_actual: Value,
    #[serde(default)]
    pub observaciones: Option<String>,
}

/// Stock Adjusted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StockAdjustedResponse {
    pub mensaje: String,
    pub anterior: i32,
    pub actual: i32,
    pub diferencia: i32,
}

/// Adjust Stock Handler
///
/// Sets a product's stock and logs the difference as an `ajuste` movement.
#[endpoint(
    tags("inventory"),
    summary = "Adjust Stock",
    security(("bearer_auth" = [])),
)]
#[tracing::instrument(
    name = "inventory.adjust",
    skip(id, json, depot),
    fields(product_id = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<AdjustStockRequest>,
    depot: &mut Depot,
) -> Result<Json<StockAdjustedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.identity_or_401()?;
    let product = id.into_id::<ProductRecord>("ID de producto inválido")?;
    let request = json.into_inner();

    let Some(new_quantity) = request.existencia_actual.as_i64() else {
        return Err(ApiError::bad_request(
            "Campo existencia_actual es requerido y debe ser numérico",
        ));
    };

    tracing::Span::current().record("product_id", tracing::field::display(product));

    let outcome = state
        .inventory
        .adjust_stock(
            StockAdjustment {
                product_id: product,
                new_quantity,
                note: request.observaciones.filter(|note| !note.is_empty()),
            },
            caller.clone(),
        )
        .await
        .map_err(|error| into_api_error("Error al actualizar inventario", error))?;

    tracing::info!(
        product_id = %product,
        previous = outcome.previous_quantity,
        delta = outcome.delta,
        "adjusted stock"
    );

    Ok(Json(StockAdjustedResponse {
        mensaje: "Inventario actualizado".to_string(),
        anterior: outcome.previous_quantity,
        actual: outcome.new_quantity,
        diferencia: outcome.delta,
    }))
}
