//! Create Entry Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use caja_app::domain::{
    entries::records::{EntryLine, NewEntry},
    products::records::ProductId,
    suppliers::records::SupplierId,
};

use crate::{errors::ApiError, extensions::*, state::State};

/// Entry Line Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct EntryLineRequest {
    pub id_producto: i32,
    pub cantidad: i32,
    /// Defaults to zero
    #[serde(default)]
    #[salvo(schema(value_type = Option<f64>))]
    pub costo_unitario: Option<Decimal>,
    /// New sale price for the product, if it changes
    #[serde(default)]
    #[salvo(schema(value_type = Option<f64>))]
    pub precio_unitario: Option<Decimal>,
}

impl From<EntryLineRequest> for EntryLine {
    fn from(line: EntryLineRequest) -> Self {
        Self {
            product_id: ProductId::new(line.id_producto),
            quantity: line.cantidad,
            unit_cost: line.costo_unitario.unwrap_or_default(),
            unit_price: line.precio_unitario,
        }
    }
}

/// Entry Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct EntryRequest {
    #[serde(default)]
    pub id_proveedor: Option<i32>,
    #[serde(default)]
    #[salvo(schema(value_type = Option<f64>))]
    pub total_entrada: Option<Decimal>,
    #[serde(default)]
    pub detalle: Vec<EntryLineRequest>,
}

impl TryFrom<EntryRequest> for NewEntry {
    type Error = ApiError;

    fn try_from(request: EntryRequest) -> Result<Self, Self::Error> {
        let Some(total) = request.total_entrada.filter(|_| !request.detalle.is_empty()) else {
            return Err(ApiError::bad_request(
                "Faltan datos en la entrada (total_entrada, detalle)",
            ));
        };

        Ok(NewEntry {
            supplier_id: request.id_proveedor.map(SupplierId::new),
            total,
            lines: request.detalle.into_iter().map(Into::into).collect(),
        })
    }
}

/// Entry Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EntryCreatedResponse {
    pub mensaje: String,
    pub id_entrada: i32,
}

/// Create Entry Handler
///
/// Records goods received from a supplier and adds them to stock.
#[endpoint(
    tags("entries"),
    summary = "Create Purchase Entry",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Entry created"),
    ),
)]
#[tracing::instrument(name = "entries.create", skip(json, depot, res), err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<EntryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<EntryCreatedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.identity_or_401()?;
    let entry = NewEntry::try_from(json.into_inner())?;

    let id = state
        .entries
        .create_entry(entry, caller.user_id)
        .await
        .or_store_error("Error al crear la entrada")?;

    tracing::info!(entry_id = %id, "created purchase entry");

    res.status_code(StatusCode::CREATED);

    Ok(Json(EntryCreatedResponse {
        mensaje: "Entrada creada con éxito".to_string(),
        id_entrada: id.into_inner(),
    }))
}

#[cfg(test)]
mod tests {
    use caja_app::{database::StoreError, domain::entries::records::EntryId};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        errors::ErrorBody,
        test_helpers::{Mocks, seller, service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, seller(), Router::with_path("entradas").post(handler))
    }

    #[tokio::test]
    async fn creates_an_entry() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .entries
            .expect_create_entry()
            .once()
            .withf(|entry, actor| {
                *actor == seller().user_id
                    && entry.supplier_id == Some(SupplierId::new(3))
                    && entry.lines.first().map(|line| (line.unit_cost, line.unit_price))
                        == Some((Decimal::ZERO, None))
            })
            .return_once(|_, _| Ok(EntryId::new(14)));

        let mut res = TestClient::post("http://example.com/entradas")
            .json(&json!({
                "id_proveedor": 3,
                "total_entrada": 100,
                "detalle": [{ "id_producto": 1, "cantidad": 10 }]
            }))
            .send(&make_service(mocks))
            .await;

        let body: EntryCreatedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.mensaje, "Entrada creada con éxito");
        assert_eq!(body.id_entrada, 14);

        Ok(())
    }

    #[tokio::test]
    async fn missing_total_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.entries.expect_create_entry().never();

        let mut res = TestClient::post("http://example.com/entradas")
            .json(&json!({ "detalle": [{ "id_producto": 1, "cantidad": 10 }] }))
            .send(&make_service(mocks))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "Faltan datos en la entrada (total_entrada, detalle)");

        Ok(())
    }

    #[tokio::test]
    async fn store_failure_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .entries
            .expect_create_entry()
            .once()
            .return_once(|_, _| Err(StoreError::ProcedureNotFound("sp_crear_entrada")));

        let mut res = TestClient::post("http://example.com/entradas")
            .json(&json!({
                "total_entrada": 100,
                "detalle": [{ "id_producto": 1, "cantidad": 10 }]
            }))
            .send(&make_service(mocks))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body.error, "Error al crear la entrada");

        Ok(())
    }
}
