//! Sales History Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use caja_app::domain::{
    customers::records::CustomerId,
    sales::{data::SaleFilter, records::SaleSummary},
};

use crate::{
    errors::ApiError,
    extensions::*,
    pagination::{PageResponse, page_request},
    state::State,
};

/// Sale Summary Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SaleSummaryResponse {
    pub id_venta: i32,
    pub id_cliente: Option<i32>,
    pub cliente_nombre: Option<String>,
    pub id_usuario: i32,
    pub usuario_app_nombre: Option<String>,
    pub fecha: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub total: Decimal,
    pub metodo_pago: String,
}

impl From<SaleSummary> for SaleSummaryResponse {
    fn from(sale: SaleSummary) -> Self {
        Self {
            id_venta: sale.id.into_inner(),
            id_cliente: sale.customer_id.map(CustomerId::into_inner),
            cliente_nombre: sale.customer_name,
            id_usuario: sale.user_id.into_inner(),
            usuario_app_nombre: sale.user_name,
            fecha: sale.sold_at.to_string(),
            total: sale.total,
            metodo_pago: sale.payment_method,
        }
    }
}

/// Sales History Handler
///
/// Sales newest first. Sellers only see the sales they recorded.
#[endpoint(
    tags("sales"),
    summary = "Sales History",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    id_cliente: QueryParam<i32, false>,
    fecha_from: QueryParam<String, false>,
    fecha_to: QueryParam<String, false>,
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<PageResponse<SaleSummaryResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.identity_or_401()?;

    let filter = SaleFilter {
        customer_id: id_cliente.into_inner().map(CustomerId::new),
        from: fecha_from.into_timestamp("fecha_from")?,
        to: fecha_to.into_timestamp("fecha_to")?,
    };

    let sales = state
        .sales
        .sales_history(filter, page_request(page, limit), caller.clone())
        .await
        .or_500("Error al obtener historial de ventas")?;

    Ok(Json(PageResponse::from_page(sales)))
}
