//! Inventory Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Row, postgres::PgRow};

use crate::{
    auth::UserId,
    domain::{
        inventory::{
            data::{InventoryFilter, MovementFilter},
            records::{InventoryItem, Movement, MovementId},
        },
        products::records::ProductId,
    },
    ids::TypedId,
    pagination::{FilterSet, PageRequest, PagedQuery, Paginated, fetch_page},
};

const INVENTORY_QUERY: PagedQuery = PagedQuery {
    count: include_str!("sql/count_inventory.sql"),
    select: include_str!("sql/list_inventory.sql"),
    order_by: "p.nombre_producto ASC, p.id_producto ASC",
};

const MOVEMENTS_QUERY: PagedQuery = PagedQuery {
    count: include_str!("sql/count_movements.sql"),
    select: include_str!("sql/list_movements.sql"),
    order_by: "im.fecha DESC, im.id_movimiento DESC",
};

const INVENTORY_SEARCH_COLUMNS: &[&str] = &["p.nombre_producto", "p.codigo_producto"];

#[derive(Debug, Clone, Default)]
pub(crate) struct PgInventoryRepository;

impl PgInventoryRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_inventory(
        &self,
        pool: &PgPool,
        filter: &InventoryFilter,
        page: PageRequest,
    ) -> Result<Paginated<InventoryItem>, sqlx::Error> {
        let filters = FilterSet::new().search(INVENTORY_SEARCH_COLUMNS, filter.search.as_deref());

        fetch_page(pool, INVENTORY_QUERY, &filters, page).await
    }

    pub(crate) async fn list_movements(
        &self,
        pool: &PgPool,
        filter: &MovementFilter,
        page: PageRequest,
    ) -> Result<Paginated<Movement>, sqlx::Error> {
        let filters = FilterSet::new()
            .equals_id("im.id_producto", filter.product_id.map(TypedId::into_inner))
            .equals_text("im.tipo", filter.kind.map(|kind| kind.as_str()))
            .since("im.fecha", filter.from)
            .until("im.fecha", filter.to);

        fetch_page(pool, MOVEMENTS_QUERY, &filters, page).await
    }
}

impl<'r> FromRow<'r, PgRow> for InventoryItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_id: ProductId::new(row.try_get("id_producto")?),
            code: row.try_get("codigo_producto")?,
            name: row.try_get("nombre_producto")?,
            sale_price: row.try_get("precio_venta")?,
            purchase_price: row.try_get("precio_compra")?,
            image_url: row.try_get("url_imagen")?,
            minimum_stock: row.try_get("stock_minimo")?,
            active: row.try_get("activo")?,
            current_quantity: row.try_get("existencia_actual")?,
            last_updated_at: row
                .try_get::<Option<SqlxTimestamp>, _>("ultima_actualizacion")?
                .map(SqlxTimestamp::to_jiff),
            category_name: row.try_get("nombre_categoria")?,
            brand_name: row.try_get("nombre_marca")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Movement {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind = row
            .try_get::<String, _>("tipo")?
            .parse()
            .map_err(|error| sqlx::Error::ColumnDecode {
                index: "tipo".to_string(),
                source: Box::new(error),
            })?;

        Ok(Self {
            id: MovementId::new(row.try_get("id_movimiento")?),
            product_id: ProductId::new(row.try_get("id_producto")?),
            product_name: row.try_get("nombre_producto")?,
            user_id: row.try_get::<Option<i32>, _>("id_usuario")?.map(UserId::new),
            user_name: row.try_get("nombre_usuario")?,
            kind,
            quantity: row.try_get("cantidad")?,
            note: row.try_get("observaciones")?,
            recorded_at: row.try_get::<SqlxTimestamp, _>("fecha")?.to_jiff(),
        })
    }
}
