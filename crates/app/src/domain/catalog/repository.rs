//! Catalog Repository

use sqlx::{FromRow, PgConnection, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::catalog::records::{Brand, BrandId, Category, CategoryId};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const RENAME_CATEGORY_SQL: &str = include_str!("sql/rename_category.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("sql/delete_category.sql");
const LIST_BRANDS_SQL: &str = include_str!("sql/list_brands.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        conn: &mut PgConnection,
    ) -> Result<Vec<Category>, sqlx::Error> {
        query_as::<Postgres, Category>(LIST_CATEGORIES_SQL)
            .fetch_all(conn)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        conn: &mut PgConnection,
        name: &str,
    ) -> Result<CategoryId, sqlx::Error> {
        query_scalar::<Postgres, i32>(CREATE_CATEGORY_SQL)
            .bind(name)
            .fetch_one(conn)
            .await
            .map(CategoryId::new)
    }

    pub(crate) async fn rename_category(
        &self,
        conn: &mut PgConnection,
        category: CategoryId,
        name: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RENAME_CATEGORY_SQL)
            .bind(category.into_inner())
            .bind(name)
            .execute(conn)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_category(
        &self,
        conn: &mut PgConnection,
        category: CategoryId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CATEGORY_SQL)
            .bind(category.into_inner())
            .execute(conn)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_brands(
        &self,
        conn: &mut PgConnection,
    ) -> Result<Vec<Brand>, sqlx::Error> {
        query_as::<Postgres, Brand>(LIST_BRANDS_SQL)
            .fetch_all(conn)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Category {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CategoryId::new(row.try_get("id_categoria")?),
            name: row.try_get("nombre_categoria")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Brand {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: BrandId::new(row.try_get("id_marca")?),
            name: row.try_get("nombre_marca")?,
        })
    }
}
