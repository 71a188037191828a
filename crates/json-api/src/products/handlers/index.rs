//! Product Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError, extensions::*, products::models::ProductResponse, state::State,
};

/// Product Index Handler
///
/// Returns every product with its stock.
#[endpoint(
    tags("products"),
    summary = "List Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .products
        .list_products()
        .await
        .or_500("Error al obtener productos")?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use caja_app::database::StoreError;
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        errors::ErrorBody,
        test_helpers::{Mocks, seller, service},
    };

    use super::{super::tests::make_product, *};

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, seller(), Router::with_path("productos").get(handler))
    }

    #[tokio::test]
    async fn returns_products() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_list_products()
            .once()
            .return_once(|| Ok(vec![make_product(1, "Café"), make_product(2, "Té")]));

        let mut res = TestClient::get("http://example.com/productos")
            .send(&make_service(mocks))
            .await;

        let body: Vec<ProductResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.len(), 2, "expected two products");
        assert_eq!(body.first().map(|p| p.id_producto), Some(1));
        assert_eq!(body.first().map(|p| p.precio_venta), Some(Decimal::new(1250, 2)));

        Ok(())
    }

    #[tokio::test]
    async fn store_failure_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_list_products()
            .once()
            .return_once(|| Err(StoreError::ProcedureNotFound("sp_obtener_productos")));

        let mut res = TestClient::get("http://example.com/productos")
            .send(&make_service(mocks))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body.error, "Error al obtener productos");
        assert!(body.detalle.is_some(), "500s carry a detail");

        Ok(())
    }
}
