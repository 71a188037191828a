//! Create Sale Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use caja_app::domain::{
    customers::records::CustomerId,
    products::records::ProductId,
    sales::data::{NewSale, SaleLine},
};

use crate::{errors::ApiError, extensions::*, state::State};

/// Sale Line Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct SaleLineRequest {
    pub id_producto: i32,
    pub cantidad: i32,
    #[salvo(schema(value_type = f64))]
    pub precio_unitario: Decimal,
    /// Defaults to zero
    #[serde(default)]
    #[salvo(schema(value_type = Option<f64>))]
    pub costo_unitario: Option<Decimal>,
    /// Defaults to `cantidad * precio_unitario`
    #[serde(default)]
    #[salvo(schema(value_type = Option<f64>))]
    pub subtotal: Option<Decimal>,
}

impl From<SaleLineRequest> for SaleLine {
    fn from(line: SaleLineRequest) -> Self {
        Self {
            product_id: ProductId::new(line.id_producto),
            quantity: line.cantidad,
            unit_price: line.precio_unitario,
            unit_cost: line.costo_unitario.unwrap_or_default(),
            subtotal: line
                .subtotal
                .unwrap_or_else(|| line.precio_unitario * Decimal::from(line.cantidad)),
        }
    }
}

/// Sale Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct SaleRequest {
    #[serde(default)]
    pub id_cliente: Option<i32>,
    #[serde(default)]
    #[salvo(schema(value_type = Option<f64>))]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub metodo_pago: Option<String>,
    #[serde(default)]
    pub detalle: Vec<SaleLineRequest>,
}

impl TryFrom<SaleRequest> for NewSale {
    type Error = ApiError;

    fn try_from(request: SaleRequest) -> Result<Self, Self::Error> {
        let (Some(total), Some(payment_method), false) = (
            request.total,
            request.metodo_pago.filter(|method| !method.trim().is_empty()),
            request.detalle.is_empty(),
        ) else {
            return Err(ApiError::bad_request(
                "Faltan datos en la venta (total, metodo_pago, detalle)",
            ));
        };

        Ok(NewSale {
            customer_id: request.id_cliente.map(CustomerId::new),
            total,
            payment_method,
            lines: request.detalle.into_iter().map(Into::into).collect(),
        })
    }
}

/// Sale Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SaleCreatedResponse {
    pub mensaje: String,
    pub id_venta: i32,
}

/// Create Sale Handler
///
/// Records a sale for the caller and discounts stock for every line.
#[endpoint(
    tags("sales"),
    summary = "Create Sale",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Sale created"),
    ),
)]
#[tracing::instrument(
    name = "sales.create",
    skip(json, depot, res),
    fields(lines = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    json: JsonBody<SaleRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SaleCreatedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.identity_or_401()?;
    let sale = NewSale::try_from(json.into_inner())?;

    tracing::Span::current().record("lines", sale.lines.len());

    let id = state
        .sales
        .create_sale(sale, caller.user_id)
        .await
        .or_store_error("Error al crear la venta")?;

    tracing::info!(sale_id = %id, "created sale");

    res.status_code(StatusCode::CREATED);

    Ok(Json(SaleCreatedResponse {
        mensaje: "Venta creada con éxito".to_string(),
        id_venta: id.into_inner(),
    }))
}
