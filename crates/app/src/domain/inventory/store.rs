//! Postgres ledger store

use async_trait::async_trait;
use sqlx::{Postgres, Transaction, query, query_scalar};

use crate::{
    database::{Db, StoreError},
    domain::{
        inventory::ledger::{LedgerStore, LedgerTransaction, LockedStock, NewMovement},
        products::records::ProductId,
    },
};

const ENSURE_STOCK_SQL: &str = include_str!("sql/ensure_stock.sql");
const LOCK_STOCK_SQL: &str = include_str!("sql/lock_stock.sql");
const WRITE_STOCK_SQL: &str = include_str!("sql/write_stock.sql");
const APPEND_MOVEMENT_SQL: &str = include_str!("sql/append_movement.sql");

#[derive(Debug, Clone)]
pub struct PgLedgerStore {
    db: Db,
}

impl PgLedgerStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn begin(&self) -> Result<Box<dyn LedgerTransaction>, StoreError> {
        let tx = self.db.begin().await?;

        Ok(Box::new(PgLedgerTransaction { tx }))
    }
}

struct PgLedgerTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl LedgerTransaction for PgLedgerTransaction {
    /// An unknown product fails the stock row's foreign key and is reported
    /// as [`StoreError::NotFound`].
    async fn lock_stock(&mut self, product: ProductId) -> Result<LockedStock, StoreError> {
        let inserted = query(ENSURE_STOCK_SQL)
            .bind(product.into_inner())
            .execute(&mut *self.tx)
            .await
            .map_err(|error| match StoreError::from(error) {
                StoreError::InvalidReference => StoreError::NotFound,
                other => other,
            })?
            .rows_affected();

        let quantity: i32 = query_scalar(LOCK_STOCK_SQL)
            .bind(product.into_inner())
            .fetch_one(&mut *self.tx)
            .await?;

        Ok(LockedStock {
            quantity,
            created: inserted == 1,
        })
    }

    async fn write_stock(&mut self, product: ProductId, quantity: i32) -> Result<(), StoreError> {
        query(WRITE_STOCK_SQL)
            .bind(product.into_inner())
            .bind(quantity)
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn append_movement(&mut self, movement: &NewMovement) -> Result<(), StoreError> {
        query(APPEND_MOVEMENT_SQL)
            .bind(movement.product_id.into_inner())
            .bind(movement.user_id.into_inner())
            .bind(movement.kind.as_str())
            .bind(movement.quantity)
            .bind(&movement.note)
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;

        Ok(())
    }
}
