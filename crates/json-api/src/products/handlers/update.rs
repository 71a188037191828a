//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use caja_app::domain::products::{data::ProductData, records::ProductRecord};

use crate::{
    errors::ApiError, extensions::*, products::models::ProductRequest, state::State,
};

/// Product Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductUpdatedResponse {
    pub mensaje: String,
    pub id_producto_actualizado: i32,
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
)]
#[tracing::instrument(
    name = "products.update",
    skip(id, json, depot),
    fields(product_id = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductUpdatedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.identity_or_401()?;
    let product = id.into_id::<ProductRecord>("ID de producto inválido")?;
    let data = ProductData::try_from(json.into_inner())?;

    tracing::Span::current().record("product_id", tracing::field::display(product));

    let updated = state
        .products
        .update_product(product, data, caller.user_id)
        .await
        .or_store_error("Error al actualizar producto")?;

    Ok(Json(ProductUpdatedResponse {
        mensaje: "Producto actualizado".to_string(),
        id_producto_actualizado: updated.into_inner(),
    }))
}

#[cfg(test)]
mod tests {
    use caja_app::{database::StoreError, domain::products::records::ProductId};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        errors::ErrorBody,
        test_helpers::{Mocks, admin, service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, admin(), Router::with_path("productos/{id}").put(handler))
    }

    fn body() -> serde_json::Value {
        json!({ "codigo_producto": "P-3", "nombre_producto": "Azúcar", "stock_minimo": 2 })
    }

    #[tokio::test]
    async fn updates_a_product() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_update_product()
            .once()
            .withf(|id, data, actor| {
                *id == ProductId::new(3) && data.minimum_stock == 2 && *actor == admin().user_id
            })
            .return_once(|id, _, _| Ok(id));

        let mut res = TestClient::put("http://example.com/productos/3")
            .json(&body())
            .send(&make_service(mocks))
            .await;

        let body: ProductUpdatedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.mensaje, "Producto actualizado");
        assert_eq!(body.id_producto_actualizado, 3);

        Ok(())
    }

    #[tokio::test]
    async fn non_numeric_id_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.products.expect_update_product().never();

        let mut res = TestClient::put("http://example.com/productos/abc")
            .json(&body())
            .send(&make_service(mocks))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "ID de producto inválido");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_returns_404() {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_update_product()
            .once()
            .return_once(|_, _, _| Err(StoreError::NotFound));

        let res = TestClient::put("http://example.com/productos/77")
            .json(&body())
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
