//! Inventory service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Identity,
    database::Db,
    domain::inventory::{
        InventoryServiceError,
        data::{AdjustmentOutcome, InventoryFilter, MovementFilter, StockAdjustment},
        ledger::StockLedger,
        records::{InventoryItem, Movement},
        repository::PgInventoryRepository,
        store::PgLedgerStore,
    },
    pagination::{PageRequest, Paginated},
};

#[derive(Debug, Clone)]
pub struct PgInventoryService {
    db: Db,
    repository: PgInventoryRepository,
    ledger: StockLedger,
}

impl PgInventoryService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        let ledger = StockLedger::new(Arc::new(PgLedgerStore::new(db.clone())));

        Self {
            db,
            repository: PgInventoryRepository::new(),
            ledger,
        }
    }
}

#[async_trait]
impl InventoryService for PgInventoryService {
    async fn list_inventory(
        &self,
        filter: InventoryFilter,
        page: PageRequest,
    ) -> Result<Paginated<InventoryItem>, InventoryServiceError> {
        Ok(self
            .repository
            .list_inventory(self.db.pool(), &filter, page)
            .await?)
    }

    async fn adjust_stock(
        &self,
        adjustment: StockAdjustment,
        actor: Identity,
    ) -> Result<AdjustmentOutcome, InventoryServiceError> {
        let ledger = self.ledger.clone();

        // The transaction must reach commit or rollback even if the caller goes away.
        tokio::spawn(async move { ledger.adjust(adjustment, &actor).await }).await?
    }

    async fn list_movements(
        &self,
        filter: MovementFilter,
        page: PageRequest,
    ) -> Result<Paginated<Movement>, InventoryServiceError> {
        Ok(self
            .repository
            .list_movements(self.db.pool(), &filter, page)
            .await?)
    }
}

#[automock]
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Products with their stock, ordered by name.
    async fn list_inventory(
        &self,
        filter: InventoryFilter,
        page: PageRequest,
    ) -> Result<Paginated<InventoryItem>, InventoryServiceError>;

    /// Set a product's stock and log the difference.
    async fn adjust_stock(
        &self,
        adjustment: StockAdjustment,
        actor: Identity,
    ) -> Result<AdjustmentOutcome, InventoryServiceError>;

    /// The movement log, newest first.
    async fn list_movements(
        &self,
        filter: MovementFilter,
        page: PageRequest,
    ) -> Result<Paginated<Movement>, InventoryServiceError>;
}
