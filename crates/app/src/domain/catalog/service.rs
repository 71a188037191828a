//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::{Db, StoreError},
    domain::catalog::{
        records::{Brand, Category, CategoryId},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut conn = self.db.pool().acquire().await?;

        Ok(self.repository.list_categories(&mut conn).await?)
    }

    async fn create_category(&self, name: String) -> Result<CategoryId, StoreError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_category(&mut tx, &name).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn rename_category(&self, category: CategoryId, name: String) -> Result<(), StoreError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .rename_category(&mut tx, category, &name)
            .await?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn delete_category(&self, category: CategoryId) -> Result<(), StoreError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_category(&mut tx, category)
            .await
            .map_err(|error| StoreError::from(error).on_delete())?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_brands(&self) -> Result<Vec<Brand>, StoreError> {
        let mut conn = self.db.pool().acquire().await?;

        Ok(self.repository.list_brands(&mut conn).await?)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// All categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    async fn create_category(&self, name: String) -> Result<CategoryId, StoreError>;

    /// Rename a category, failing with `NotFound` when it does not exist.
    async fn rename_category(&self, category: CategoryId, name: String) -> Result<(), StoreError>;

    /// Delete a category. A category still used by products is `InUse`.
    async fn delete_category(&self, category: CategoryId) -> Result<(), StoreError>;

    /// All brands ordered by name.
    async fn list_brands(&self) -> Result<Vec<Brand>, StoreError>;
}
