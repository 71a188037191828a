//! Supplier Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use caja_app::domain::suppliers::data::SupplierFilter;

use crate::{
    errors::ApiError,
    extensions::*,
    pagination::{PageResponse, page_request},
    state::State,
    suppliers::SupplierResponse,
};

/// Supplier Index Handler
#[endpoint(
    tags("suppliers"),
    summary = "List Suppliers",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<PageResponse<SupplierResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = SupplierFilter {
        search: search.into_inner().filter(|term| !term.trim().is_empty()),
    };

    let suppliers = state
        .suppliers
        .list_suppliers(filter, page_request(page, limit))
        .await
        .or_500("Error al obtener proveedores")?;

    Ok(Json(PageResponse::from_page(suppliers)))
}
