//! Products Repository

use sqlx::{FromRow, PgConnection, Postgres, Row, postgres::PgRow, query_as, query_scalar};

use crate::{
    auth::UserId,
    database::{CREATE_PRODUCT, LIST_PRODUCTS, StoreError, UPDATE_PRODUCT},
    domain::{
        catalog::records::{BrandId, CategoryId},
        products::{
            data::ProductData,
            records::{Product, ProductId},
        },
    },
    ids::TypedId,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const INSERT_PRODUCT_SQL: &str = include_str!("sql/insert_product.sql");
const REPLACE_PRODUCT_SQL: &str = include_str!("sql/replace_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        conn: &mut PgConnection,
    ) -> Result<Vec<Product>, StoreError> {
        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(conn)
            .await
            .map_err(|error| LIST_PRODUCTS.call_error(error))
    }

    pub(crate) async fn call_create_product(
        &self,
        conn: &mut PgConnection,
        product: &ProductData,
    ) -> Result<ProductId, StoreError> {
        query_scalar::<Postgres, i32>(CREATE_PRODUCT_SQL)
            .bind(&product.code)
            .bind(&product.name)
            .bind(product.sale_price)
            .bind(product.purchase_price)
            .bind(product.category_id.map(TypedId::into_inner))
            .bind(product.brand_id.map(TypedId::into_inner))
            .bind(product.image_url.as_deref())
            .bind(product.minimum_stock)
            .bind(product.active)
            .fetch_one(conn)
            .await
            .map(ProductId::new)
            .map_err(|error| CREATE_PRODUCT.call_error(error))
    }

    /// Returns `None` when the product does not exist.
    pub(crate) async fn call_update_product(
        &self,
        conn: &mut PgConnection,
        product: ProductId,
        data: &ProductData,
        actor: UserId,
    ) -> Result<Option<ProductId>, StoreError> {
        query_scalar::<Postgres, Option<i32>>(UPDATE_PRODUCT_SQL)
            .bind(product.into_inner())
            .bind(&data.code)
            .bind(&data.name)
            .bind(data.sale_price)
            .bind(data.purchase_price)
            .bind(data.category_id.map(TypedId::into_inner))
            .bind(data.brand_id.map(TypedId::into_inner))
            .bind(data.image_url.as_deref())
            .bind(data.minimum_stock)
            .bind(data.active)
            .bind(actor.into_inner())
            .fetch_one(conn)
            .await
            .map(|id| id.map(ProductId::new))
            .map_err(|error| UPDATE_PRODUCT.call_error(error))
    }

    pub(crate) async fn insert_product(
        &self,
        conn: &mut PgConnection,
        product: &ProductData,
    ) -> Result<ProductId, sqlx::Error> {
        query_scalar::<Postgres, i32>(INSERT_PRODUCT_SQL)
            .bind(&product.code)
            .bind(&product.name)
            .bind(product.sale_price)
            .bind(product.purchase_price)
            .bind(product.category_id.map(TypedId::into_inner))
            .bind(product.brand_id.map(TypedId::into_inner))
            .bind(product.image_url.as_deref())
            .bind(product.minimum_stock)
            .bind(product.active)
            .fetch_one(conn)
            .await
            .map(ProductId::new)
    }

    pub(crate) async fn replace_product(
        &self,
        conn: &mut PgConnection,
        product: ProductId,
        data: &ProductData,
    ) -> Result<Option<ProductId>, sqlx::Error> {
        query_scalar::<Postgres, i32>(REPLACE_PRODUCT_SQL)
            .bind(product.into_inner())
            .bind(&data.code)
            .bind(&data.name)
            .bind(data.sale_price)
            .bind(data.purchase_price)
            .bind(data.category_id.map(TypedId::into_inner))
            .bind(data.brand_id.map(TypedId::into_inner))
            .bind(data.image_url.as_deref())
            .bind(data.minimum_stock)
            .bind(data.active)
            .fetch_optional(conn)
            .await
            .map(|id| id.map(ProductId::new))
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ProductId::new(row.try_get("id_producto")?),
            code: row.try_get("codigo_producto")?,
            name: row.try_get("nombre_producto")?,
            sale_price: row.try_get("precio_venta")?,
            purchase_price: row.try_get("precio_compra")?,
            category_id: row
                .try_get::<Option<i32>, _>("id_categoria")?
                .map(CategoryId::new),
            brand_id: row.try_get::<Option<i32>, _>("id_marca")?.map(BrandId::new),
            image_url: row.try_get("url_imagen")?,
            minimum_stock: row.try_get("stock_minimo")?,
            active: row.try_get("activo")?,
            stock: row.try_get("existencia_actual")?,
        })
    }
}
