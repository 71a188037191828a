//! Inventory Index Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use caja_app::domain::inventory::{data::InventoryFilter, records::InventoryItem};

use crate::{
    errors::ApiError,
    extensions::*,
    inventory::into_api_error,
    pagination::{PageResponse, page_request},
    state::State,
};

/// Inventory Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InventoryItemResponse {
    pub id_producto: i32,
    pub codigo_producto: String,
    pub nombre_producto: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub precio_venta: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub precio_compra: Decimal,
    pub url_imagen: Option<String>,
    pub stock_minimo: i32,
    pub activo: bool,
    /// `null` until the first adjustment
    pub existencia_actual: Option<i32>,
    pub ultima_actualizacion: Option<String>,
    pub nombre_categoria: Option<String>,
    pub nombre_marca: Option<String>,
}

impl From<InventoryItem> for InventoryItemResponse {
    fn from(item: InventoryItem) -> Self {
        Self {
            id_producto: item.product_id.into_inner(),
            codigo_producto: item.code,
            nombre_producto: item.name,
            precio_venta: item.sale_price,
            precio_compra: item.purchase_price,
            url_imagen: item.image_url,
            stock_minimo: item.minimum_stock,
            activo: item.active,
            existencia_actual: item.current_quantity,
            ultima_actualizacion: item.last_updated_at.map(|at| at.to_string()),
            nombre_categoria: item.category_name,
            nombre_marca: item.brand_name,
        }
    }
}

/// Inventory Index Handler
///
/// Products with their current stock, ordered by name. `search` matches
/// the product name or code.
#[endpoint(
    tags("inventory"),
    summary = "List Inventory",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<PageResponse<InventoryItemResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = InventoryFilter {
        search: search.into_inner().filter(|term| !term.trim().is_empty()),
    };

    let inventory = state
        .inventory
        .list_inventory(filter, page_request(page, limit))
        .await
        .map_err(|error| into_api_error("Error al obtener inventario", error))?;

    Ok(Json(PageResponse::from_page(inventory)))
}
