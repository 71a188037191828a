//! Sales Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection, PgPool, Postgres, Row, postgres::PgRow, query_scalar};

use crate::{
    auth::UserId,
    database::{CREATE_SALE, StoreError},
    domain::{
        customers::records::CustomerId,
        sales::{
            data::{NewSale, SaleFilter},
            records::{SaleId, SaleSummary},
        },
    },
    ids::TypedId,
    pagination::{FilterSet, PageRequest, PagedQuery, Paginated, fetch_page},
};

const CREATE_SALE_SQL: &str = include_str!("sql/create_sale.sql");

const SALES_QUERY: PagedQuery = PagedQuery {
    count: include_str!("sql/count_sales.sql"),
    select: include_str!("sql/list_sales.sql"),
    order_by: "v.fecha DESC, v.id_venta DESC",
};

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSalesRepository;

impl PgSalesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_sale(
        &self,
        conn: &mut PgConnection,
        sale: &NewSale,
        actor: UserId,
    ) -> Result<SaleId, StoreError> {
        let products: Vec<i32> = sale
            .lines
            .iter()
            .map(|line| line.product_id.into_inner())
            .collect();
        let quantities: Vec<i32> = sale.lines.iter().map(|line| line.quantity).collect();
        let prices: Vec<Decimal> = sale.lines.iter().map(|line| line.unit_price).collect();
        let costs: Vec<Decimal> = sale.lines.iter().map(|line| line.unit_cost).collect();
        let subtotals: Vec<Decimal> = sale.lines.iter().map(|line| line.subtotal).collect();

        query_scalar::<Postgres, i32>(CREATE_SALE_SQL)
            .bind(sale.customer_id.map(TypedId::into_inner))
            .bind(actor.into_inner())
            .bind(sale.total)
            .bind(&sale.payment_method)
            .bind(products)
            .bind(quantities)
            .bind(prices)
            .bind(costs)
            .bind(subtotals)
            .fetch_one(conn)
            .await
            .map(SaleId::new)
            .map_err(|error| CREATE_SALE.call_error(error))
    }

    /// `seller` limits the history to sales made by that user.
    pub(crate) async fn list_sales(
        &self,
        pool: &PgPool,
        filter: &SaleFilter,
        seller: Option<UserId>,
        page: PageRequest,
    ) -> Result<Paginated<SaleSummary>, sqlx::Error> {
        let filters = FilterSet::new()
            .equals_id("v.id_cliente", filter.customer_id.map(TypedId::into_inner))
            .since("v.fecha", filter.from)
            .until("v.fecha", filter.to)
            .equals_id("v.id_usuario", seller.map(TypedId::into_inner));

        fetch_page(pool, SALES_QUERY, &filters, page).await
    }
}

impl<'r> FromRow<'r, PgRow> for SaleSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: SaleId::new(row.try_get("id_venta")?),
            customer_id: row
                .try_get::<Option<i32>, _>("id_cliente")?
                .map(CustomerId::new),
            customer_name: row.try_get("cliente_nombre")?,
            user_id: UserId::new(row.try_get("id_usuario")?),
            user_name: row.try_get("usuario_app_nombre")?,
            sold_at: row.try_get::<SqlxTimestamp, _>("fecha")?.to_jiff(),
            total: row.try_get("total")?,
            payment_method: row.try_get("metodo_pago")?,
        })
    }
}
