//! Suppliers service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::{Db, StoreError},
    domain::suppliers::{
        data::{SupplierData, SupplierFilter},
        records::{Supplier, SupplierId},
        repository::PgSuppliersRepository,
    },
    pagination::{PageRequest, Paginated},
};

#[derive(Debug, Clone)]
pub struct PgSuppliersService {
    db: Db,
    repository: PgSuppliersRepository,
}

impl PgSuppliersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSuppliersRepository::new(),
        }
    }
}

#[async_trait]
impl SuppliersService for PgSuppliersService {
    async fn list_suppliers(
        &self,
        filter: SupplierFilter,
        page: PageRequest,
    ) -> Result<Paginated<Supplier>, StoreError> {
        Ok(self
            .repository
            .list_suppliers(self.db.pool(), &filter, page)
            .await?)
    }

    async fn create_supplier(&self, supplier: SupplierData) -> Result<SupplierId, StoreError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_supplier(&mut tx, &supplier).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait SuppliersService: Send + Sync {
    /// Suppliers ordered by name.
    async fn list_suppliers(
        &self,
        filter: SupplierFilter,
        page: PageRequest,
    ) -> Result<Paginated<Supplier>, StoreError>;

    async fn create_supplier(&self, supplier: SupplierData) -> Result<SupplierId, StoreError>;
}
