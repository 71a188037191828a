//! Suppliers Repository

use sqlx::{FromRow, PgConnection, PgPool, Postgres, Row, postgres::PgRow, query_scalar};

use crate::{
    domain::suppliers::{
        data::{SupplierData, SupplierFilter},
        records::{Supplier, SupplierId},
    },
    pagination::{FilterSet, PageRequest, PagedQuery, Paginated, fetch_page},
};

const CREATE_SUPPLIER_SQL: &str = include_str!("sql/create_supplier.sql");

const SUPPLIERS_QUERY: PagedQuery = PagedQuery {
    count: include_str!("sql/count_suppliers.sql"),
    select: include_str!("sql/list_suppliers.sql"),
    order_by: "nombre_proveedor ASC, id_proveedor ASC",
};

const SUPPLIER_SEARCH_COLUMNS: &[&str] = &["nombre_proveedor", "rfc"];

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSuppliersRepository;

impl PgSuppliersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_suppliers(
        &self,
        pool: &PgPool,
        filter: &SupplierFilter,
        page: PageRequest,
    ) -> Result<Paginated<Supplier>, sqlx::Error> {
        let filters = FilterSet::new().search(SUPPLIER_SEARCH_COLUMNS, filter.search.as_deref());

        fetch_page(pool, SUPPLIERS_QUERY, &filters, page).await
    }

    pub(crate) async fn create_supplier(
        &self,
        conn: &mut PgConnection,
        supplier: &SupplierData,
    ) -> Result<SupplierId, sqlx::Error> {
        query_scalar::<Postgres, i32>(CREATE_SUPPLIER_SQL)
            .bind(&supplier.name)
            .bind(supplier.rfc.as_deref())
            .bind(supplier.email.as_deref())
            .bind(supplier.phone.as_deref())
            .bind(supplier.address.as_deref())
            .fetch_one(conn)
            .await
            .map(SupplierId::new)
    }
}

impl<'r> FromRow<'r, PgRow> for Supplier {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: SupplierId::new(row.try_get("id_proveedor")?),
            name: row.try_get("nombre_proveedor")?,
            rfc: row.try_get("rfc")?,
            email: row.try_get("correo")?,
            phone: row.try_get("telefono")?,
            address: row.try_get("direccion")?,
        })
    }
}
