//! Audit Log Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use caja_app::{
    auth::UserId,
    domain::audit::{AuditEntry, AuditFilter},
};

use crate::{
    errors::ApiError,
    extensions::*,
    pagination::{PageResponse, page_request},
    state::State,
};

/// Audit Entry Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuditEntryResponse {
    pub id_bitacora: i32,
    pub nombre_tabla: String,
    pub tipo_operacion: String,
    pub id_registro: Option<i32>,
    pub descripcion: Option<String>,
    pub usuario_app: Option<i32>,
    pub usuario_app_nombre: Option<String>,
    pub fecha_modificacion: String,
}

impl From<AuditEntry> for AuditEntryResponse {
    fn from(entry: AuditEntry) -> Self {
        Self {
            id_bitacora: entry.id.into_inner(),
            nombre_tabla: entry.table_name,
            tipo_operacion: entry.operation,
            id_registro: entry.record_id,
            descripcion: entry.description,
            usuario_app: entry.app_user_id.map(UserId::into_inner),
            usuario_app_nombre: entry.app_user_name,
            fecha_modificacion: entry.modified_at.to_string(),
        }
    }
}

/// Audit Log Handler
#[endpoint(
    tags("audit"),
    summary = "List Audit Log",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    nombre_tabla: QueryParam<String, false>,
    tipo_operacion: QueryParam<String, false>,
    fecha_from: QueryParam<String, false>,
    fecha_to: QueryParam<String, false>,
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<PageResponse<AuditEntryResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = AuditFilter {
        table_name: nombre_tabla.into_inner().filter(|name| !name.is_empty()),
        operation: tipo_operacion.into_inner().filter(|name| !name.is_empty()),
        from: fecha_from.into_timestamp("fecha_from")?,
        to: fecha_to.into_timestamp("fecha_to")?,
    };

    let entries = state
        .audit
        .list_audit(filter, page_request(page, limit))
        .await
        .or_500("Error al obtener bitacora")?;

    Ok(Json(PageResponse::from_page(entries)))
}

#[cfg(test)]
mod tests {
    use caja_app::{domain::audit::AuditId, pagination::Paginated};
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, admin, service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, admin(), Router::with_path("bitacora").get(handler))
    }

    #[tokio::test]
    async fn filters_by_table_operation_and_dates() -> TestResult {
        let mut mocks = Mocks::default();
        let to: Timestamp = "2024-05-31T00:00:00Z".parse()?;

        mocks
            .audit
            .expect_list_audit()
            .once()
            .withf(move |filter, page| {
                filter.table_name.as_deref() == Some("clientes")
                    && filter.operation.as_deref() == Some("UPDATE")
                    && filter.from.is_none()
                    && filter.to == Some(to)
                    && page.limit() == 5
            })
            .return_once(|_, page| {
                Ok(Paginated {
                    page: page.page(),
                    limit: page.limit(),
                    total: 1,
                    items: vec![AuditEntry {
                        id: AuditId::new(1),
                        table_name: "clientes".to_string(),
                        operation: "UPDATE".to_string(),
                        record_id: Some(4),
                        description: None,
                        app_user_id: Some(UserId::new(1)),
                        app_user_name: Some("Admin".to_string()),
                        modified_at: Timestamp::UNIX_EPOCH,
                    }],
                })
            });

        let mut res = TestClient::get(
            "http://example.com/bitacora?nombre_tabla=clientes&tipo_operacion=UPDATE&fecha_to=2024-05-31&limit=5",
        )
        .send(&make_service(mocks))
        .await;

        let body: PageResponse<AuditEntryResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.limit, 5);
        assert_eq!(
            body.items.first().map(|entry| entry.usuario_app_nombre.as_deref()),
            Some(Some("Admin"))
        );

        Ok(())
    }

    #[tokio::test]
    async fn limits_below_one_are_clamped() {
        let mut mocks = Mocks::default();

        mocks
            .audit
            .expect_list_audit()
            .once()
            .withf(|_, page| page.page() == 1 && page.limit() == 1)
            .return_once(|_, page| {
                Ok(Paginated {
                    page: page.page(),
                    limit: page.limit(),
                    total: 0,
                    items: vec![],
                })
            });

        let res = TestClient::get("http://example.com/bitacora?page=0&limit=-3")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }
}
