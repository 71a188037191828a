//! Audit log
//!
//! Read side of `bitacora_cliente`. Rows are written by the customer
//! procedures, or by the customers service when running inline.

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Row, postgres::PgRow};

use crate::{
    auth::UserId,
    database::{Db, StoreError},
    ids::TypedId,
    pagination::{FilterSet, PageRequest, PagedQuery, Paginated, fetch_page},
};

const AUDIT_QUERY: PagedQuery = PagedQuery {
    count: include_str!("sql/count_audit.sql"),
    select: include_str!("sql/list_audit.sql"),
    order_by: "b.fecha_modificacion DESC, b.id_bitacora DESC",
};

/// Audit Record
pub struct AuditRecord;

/// Audit Entry Id
pub type AuditId = TypedId<AuditRecord>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub id: AuditId,
    pub table_name: String,
    pub operation: String,
    pub record_id: Option<i32>,
    pub description: Option<String>,
    pub app_user_id: Option<UserId>,
    pub app_user_name: Option<String>,
    pub modified_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    pub table_name: Option<String>,
    pub operation: Option<String>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

#[derive(Debug, Clone)]
pub struct PgAuditService {
    db: Db,
}

impl PgAuditService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

async fn list_entries(
    pool: &PgPool,
    filter: &AuditFilter,
    page: PageRequest,
) -> Result<Paginated<AuditEntry>, sqlx::Error> {
    let filters = FilterSet::new()
        .equals_text("b.nombre_tabla", filter.table_name.as_deref())
        .equals_text("b.tipo_operacion", filter.operation.as_deref())
        .since("b.fecha_modificacion", filter.from)
        .until("b.fecha_modificacion", filter.to);

    fetch_page(pool, AUDIT_QUERY, &filters, page).await
}

#[async_trait]
impl AuditService for PgAuditService {
    async fn list_audit(
        &self,
        filter: AuditFilter,
        page: PageRequest,
    ) -> Result<Paginated<AuditEntry>, StoreError> {
        Ok(list_entries(self.db.pool(), &filter, page).await?)
    }
}

#[automock]
#[async_trait]
pub trait AuditService: Send + Sync {
    /// Audit entries, newest first.
    async fn list_audit(
        &self,
        filter: AuditFilter,
        page: PageRequest,
    ) -> Result<Paginated<AuditEntry>, StoreError>;
}

impl<'r> FromRow<'r, PgRow> for AuditEntry {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: AuditId::new(row.try_get("id_bitacora")?),
            table_name: row.try_get("nombre_tabla")?,
            operation: row.try_get("tipo_operacion")?,
            record_id: row.try_get("id_registro")?,
            description: row.try_get("descripcion")?,
            app_user_id: row.try_get::<Option<i32>, _>("usuario_app")?.map(UserId::new),
            app_user_name: row.try_get("usuario_app_nombre")?,
            modified_at: row
                .try_get::<SqlxTimestamp, _>("fecha_modificacion")?
                .to_jiff(),
        })
    }
}
