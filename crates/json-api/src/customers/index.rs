//! Customer Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use caja_app::domain::customers::data::CustomerFilter;

use crate::{
    customers::models::CustomerResponse,
    errors::ApiError,
    extensions::*,
    pagination::{PageResponse, page_request},
    state::State,
};

/// Customer Index Handler
///
/// Customers ordered by name. `search` matches name, RFC or email.
#[endpoint(
    tags("customers"),
    summary = "List Customers",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<PageResponse<CustomerResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = CustomerFilter {
        search: search.into_inner().filter(|term| !term.trim().is_empty()),
    };

    let customers = state
        .customers
        .list_customers(filter, page_request(page, limit))
        .await
        .or_500("Error al obtener clientes")?;

    Ok(Json(PageResponse::from_page(customers)))
}

#[cfg(test)]
mod tests {
    use caja_app::{
        database::StoreError,
        domain::customers::records::{Customer, CustomerId},
        pagination::Paginated,
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, seller, service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, seller(), Router::with_path("clientes").get(handler))
    }

    #[tokio::test]
    async fn returns_a_page_of_customers() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .customers
            .expect_list_customers()
            .once()
            .withf(|filter, page| filter.search.as_deref() == Some("luna") && page.page() == 3)
            .return_once(|_, page| {
                Ok(Paginated {
                    page: page.page(),
                    limit: page.limit(),
                    total: 21,
                    items: vec![Customer {
                        id: CustomerId::new(21),
                        name: "Ferretería Luna".to_string(),
                        rfc: None,
                        email: Some("compras@luna.mx".to_string()),
                        phone: None,
                        address: None,
                    }],
                })
            });

        let mut res = TestClient::get("http://example.com/clientes?search=luna&page=3&limit=10")
            .send(&make_service(mocks))
            .await;

        let body: PageResponse<CustomerResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!((body.page, body.limit, body.total), (3, 10, 21));
        assert_eq!(
            body.items.first().and_then(|c| c.correo.as_deref()),
            Some("compras@luna.mx")
        );

        Ok(())
    }

    #[tokio::test]
    async fn store_failure_returns_500() {
        let mut mocks = Mocks::default();

        mocks
            .customers
            .expect_list_customers()
            .once()
            .return_once(|_, _| Err(StoreError::InvalidData));

        let res = TestClient::get("http://example.com/clientes")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
