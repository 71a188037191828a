//! Customers Repository

use sqlx::{FromRow, PgConnection, PgPool, Postgres, Row, postgres::PgRow, query, query_scalar};

use crate::{
    auth::UserId,
    database::{CREATE_CUSTOMER, DELETE_CUSTOMER, StoreError, UPDATE_CUSTOMER},
    domain::customers::{
        data::{CustomerData, CustomerFilter},
        records::{Customer, CustomerId},
    },
    pagination::{FilterSet, PageRequest, PagedQuery, Paginated, fetch_page},
};

const CREATE_CUSTOMER_SQL: &str = include_str!("sql/create_customer.sql");
const UPDATE_CUSTOMER_SQL: &str = include_str!("sql/update_customer.sql");
const DELETE_CUSTOMER_SQL: &str = include_str!("sql/delete_customer.sql");
const INSERT_CUSTOMER_SQL: &str = include_str!("sql/insert_customer.sql");
const REPLACE_CUSTOMER_SQL: &str = include_str!("sql/replace_customer.sql");
const REMOVE_CUSTOMER_SQL: &str = include_str!("sql/remove_customer.sql");
const RECORD_CHANGE_SQL: &str = include_str!("sql/record_change.sql");

const CUSTOMERS_QUERY: PagedQuery = PagedQuery {
    count: include_str!("sql/count_customers.sql"),
    select: include_str!("sql/list_customers.sql"),
    order_by: "nombre_cliente ASC, id_cliente ASC",
};

const CUSTOMER_SEARCH_COLUMNS: &[&str] = &["nombre_cliente", "rfc"];

/// Operation names written to `bitacora_cliente.tipo_operacion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Change {
    Insert,
    Update,
    Delete,
}

impl Change {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCustomersRepository;

impl PgCustomersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_customers(
        &self,
        pool: &PgPool,
        filter: &CustomerFilter,
        page: PageRequest,
    ) -> Result<Paginated<Customer>, sqlx::Error> {
        let filters = FilterSet::new().search(CUSTOMER_SEARCH_COLUMNS, filter.search.as_deref());

        fetch_page(pool, CUSTOMERS_QUERY, &filters, page).await
    }

    pub(crate) async fn call_create_customer(
        &self,
        conn: &mut PgConnection,
        customer: &CustomerData,
        actor: UserId,
    ) -> Result<CustomerId, StoreError> {
        query_scalar::<Postgres, i32>(CREATE_CUSTOMER_SQL)
            .bind(&customer.name)
            .bind(customer.rfc.as_deref())
            .bind(customer.email.as_deref())
            .bind(customer.phone.as_deref())
            .bind(customer.address.as_deref())
            .bind(actor.into_inner())
            .fetch_one(conn)
            .await
            .map(CustomerId::new)
            .map_err(|error| CREATE_CUSTOMER.call_error(error))
    }

    pub(crate) async fn call_update_customer(
        &self,
        conn: &mut PgConnection,
        customer: CustomerId,
        data: &CustomerData,
        actor: UserId,
    ) -> Result<Option<CustomerId>, StoreError> {
        query_scalar::<Postgres, Option<i32>>(UPDATE_CUSTOMER_SQL)
            .bind(customer.into_inner())
            .bind(&data.name)
            .bind(data.rfc.as_deref())
            .bind(data.email.as_deref())
            .bind(data.phone.as_deref())
            .bind(data.address.as_deref())
            .bind(actor.into_inner())
            .fetch_one(conn)
            .await
            .map(|id| id.map(CustomerId::new))
            .map_err(|error| UPDATE_CUSTOMER.call_error(error))
    }

    pub(crate) async fn call_delete_customer(
        &self,
        conn: &mut PgConnection,
        customer: CustomerId,
        actor: UserId,
    ) -> Result<Option<CustomerId>, StoreError> {
        query_scalar::<Postgres, Option<i32>>(DELETE_CUSTOMER_SQL)
            .bind(customer.into_inner())
            .bind(actor.into_inner())
            .fetch_one(conn)
            .await
            .map(|id| id.map(CustomerId::new))
            .map_err(|error| DELETE_CUSTOMER.call_error(error).on_delete())
    }

    pub(crate) async fn insert_customer(
        &self,
        conn: &mut PgConnection,
        customer: &CustomerData,
    ) -> Result<CustomerId, sqlx::Error> {
        query_scalar::<Postgres, i32>(INSERT_CUSTOMER_SQL)
            .bind(&customer.name)
            .bind(customer.rfc.as_deref())
            .bind(customer.email.as_deref())
            .bind(customer.phone.as_deref())
            .bind(customer.address.as_deref())
            .fetch_one(conn)
            .await
            .map(CustomerId::new)
    }

    pub(crate) async fn replace_customer(
        &self,
        conn: &mut PgConnection,
        customer: CustomerId,
        data: &CustomerData,
    ) -> Result<Option<CustomerId>, sqlx::Error> {
        query_scalar::<Postgres, i32>(REPLACE_CUSTOMER_SQL)
            .bind(customer.into_inner())
            .bind(&data.name)
            .bind(data.rfc.as_deref())
            .bind(data.email.as_deref())
            .bind(data.phone.as_deref())
            .bind(data.address.as_deref())
            .fetch_optional(conn)
            .await
            .map(|id| id.map(CustomerId::new))
    }

    pub(crate) async fn remove_customer(
        &self,
        conn: &mut PgConnection,
        customer: CustomerId,
    ) -> Result<Option<CustomerId>, sqlx::Error> {
        query_scalar::<Postgres, i32>(REMOVE_CUSTOMER_SQL)
            .bind(customer.into_inner())
            .fetch_optional(conn)
            .await
            .map(|id| id.map(CustomerId::new))
    }

    pub(crate) async fn record_change(
        &self,
        conn: &mut PgConnection,
        change: Change,
        customer: CustomerId,
        description: &str,
        actor: UserId,
    ) -> Result<(), sqlx::Error> {
        query(RECORD_CHANGE_SQL)
            .bind(change.as_str())
            .bind(customer.into_inner())
            .bind(description)
            .bind(actor.into_inner())
            .execute(conn)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for Customer {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CustomerId::new(row.try_get("id_cliente")?),
            name: row.try_get("nombre_cliente")?,
            rfc: row.try_get("rfc")?,
            email: row.try_get("correo")?,
            phone: row.try_get("telefono")?,
            address: row.try_get("direccion")?,
        })
    }
}
