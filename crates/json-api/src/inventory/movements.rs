//! Stock Movements Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use caja_app::{
    auth::UserId,
    domain::{
        inventory::{
            data::MovementFilter,
            records::{Movement, MovementKind},
        },
        products::records::ProductId,
    },
};

use crate::{
    errors::ApiError,
    extensions::*,
    inventory::into_api_error,
    pagination::{PageResponse, page_request},
    state::State,
};

/// Movement Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MovementResponse {
    pub id_movimiento: i32,
    pub id_producto: i32,
    pub nombre_producto: Option<String>,
    pub id_usuario: Option<i32>,
    pub nombre_usuario: Option<String>,
    /// `ajuste`, `venta` or `entrada`
    pub tipo: String,
    /// Signed stock delta
    pub cantidad: i32,
    pub observaciones: Option<String>,
    pub fecha: String,
}

impl From<Movement> for MovementResponse {
    fn from(movement: Movement) -> Self {
        Self {
            id_movimiento: movement.id.into_inner(),
            id_producto: movement.product_id.into_inner(),
            nombre_producto: movement.product_name,
            id_usuario: movement.user_id.map(UserId::into_inner),
            nombre_usuario: movement.user_name,
            tipo: movement.kind.as_str().to_string(),
            cantidad: movement.quantity,
            observaciones: movement.note,
            fecha: movement.recorded_at.to_string(),
        }
    }
}

/// Stock Movements Handler
///
/// The movement log, newest first.
#[endpoint(
    tags("inventory"),
    summary = "List Stock Movements",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    id_producto: QueryParam<i32, false>,
    tipo: QueryParam<String, false>,
    fecha_from: QueryParam<String, false>,
    fecha_to: QueryParam<String, false>,
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<PageResponse<MovementResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let kind = tipo
        .into_inner()
        .filter(|kind| !kind.is_empty())
        .map(|kind| kind.parse::<MovementKind>())
        .transpose()
        .map_err(|_unknown| ApiError::bad_request("tipo debe ser ajuste, venta o entrada"))?;

    let filter = MovementFilter {
        product_id: id_producto.into_inner().map(ProductId::new),
        kind,
        from: fecha_from.into_timestamp("fecha_from")?,
        to: fecha_to.into_timestamp("fecha_to")?,
    };

    let movements = state
        .inventory
        .list_movements(filter, page_request(page, limit))
        .await
        .map_err(|error| into_api_error("Error al obtener movimientos", error))?;

    Ok(Json(PageResponse::from_page(movements)))
}
