//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use caja_app::domain::products::data::ProductData;

use crate::{
    errors::ApiError, extensions::*, products::models::ProductRequest, state::State,
};

/// Product Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCreatedResponse {
    pub mensaje: String,
    pub id_producto: i32,
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
    ),
)]
#[tracing::instrument(name = "products.create", skip(json, depot, res), err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductCreatedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = ProductData::try_from(json.into_inner())?;

    let id = state
        .products
        .create_product(product)
        .await
        .or_store_error("Error al crear producto")?;

    res.add_header(LOCATION, format!("/api/productos/{id}"), true)
        .or_500("Error al crear producto")?
        .status_code(StatusCode::CREATED);

    tracing::info!(product_id = %id, "created product");

    Ok(Json(ProductCreatedResponse {
        mensaje: "Producto creado".to_string(),
        id_producto: id.into_inner(),
    }))
}
