//! Stock ledger.
//!
//! A manual adjustment sets a product's stock to an absolute quantity and
//! appends the difference to the movement log in the same transaction, so the
//! stored quantity always equals the sum of the product's movements.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use tracing::info;

use crate::{
    auth::{Identity, UserId},
    database::StoreError,
    domain::{
        inventory::{
            InventoryServiceError,
            data::{AdjustmentOutcome, StockAdjustment},
            records::MovementKind,
        },
        products::records::ProductId,
    },
};

/// Stock row state once it is locked for the current transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockedStock {
    pub quantity: i32,

    /// The row did not exist and was inserted by this transaction.
    pub created: bool,
}

/// Movement appended by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovement {
    pub product_id: ProductId,
    pub user_id: UserId,
    pub kind: MovementKind,
    pub quantity: i32,
    pub note: String,
}

/// Opens ledger transactions.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn LedgerTransaction>, StoreError>;
}

/// One open ledger transaction. Dropping it without `commit` rolls it back.
#[async_trait]
pub trait LedgerTransaction: Send {
    /// Make sure the product has a stock row and lock it.
    async fn lock_stock(&mut self, product: ProductId) -> Result<LockedStock, StoreError>;

    async fn write_stock(&mut self, product: ProductId, quantity: i32) -> Result<(), StoreError>;

    async fn append_movement(&mut self, movement: &NewMovement) -> Result<(), StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct StockLedger {
    store: Arc<dyn LedgerStore>,
}

impl StockLedger {
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Set a product's stock and record the difference as an `ajuste` movement.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryServiceError::InvalidQuantity`] when the quantity or
    /// the resulting delta do not fit the stock column,
    /// [`InventoryServiceError::ProductNotFound`] for an unknown product, and a
    /// store error for anything else. Nothing is written on error.
    pub async fn adjust(
        &self,
        adjustment: StockAdjustment,
        actor: &Identity,
    ) -> Result<AdjustmentOutcome, InventoryServiceError> {
        let new_quantity = i32::try_from(adjustment.new_quantity)
            .map_err(|_| InventoryServiceError::InvalidQuantity)?;

        let product = adjustment.product_id;

        let mut tx = self.store.begin().await?;

        let locked = tx.lock_stock(product).await?;

        let previous_quantity = if locked.created { 0 } else { locked.quantity };

        let delta = new_quantity
            .checked_sub(previous_quantity)
            .ok_or(InventoryServiceError::InvalidQuantity)?;

        tx.write_stock(product, new_quantity).await?;

        let note = adjustment
            .note
            .filter(|note| !note.trim().is_empty())
            .unwrap_or_else(|| default_note(&actor.display_name));

        tx.append_movement(&NewMovement {
            product_id: product,
            user_id: actor.user_id,
            kind: MovementKind::Adjustment,
            quantity: delta,
            note,
        })
        .await?;

        tx.commit().await?;

        info!(
            product_id = %product,
            user_id = %actor.user_id,
            previous_quantity,
            new_quantity,
            delta,
            created = locked.created,
            "stock adjusted"
        );

        Ok(AdjustmentOutcome {
            previous_quantity,
            new_quantity,
            delta,
        })
    }
}

impl fmt::Debug for StockLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StockLedger").finish_non_exhaustive()
    }
}

fn default_note(display_name: &str) -> String {
    let name = if display_name.trim().is_empty() {
        "usuario"
    } else {
        display_name
    };

    format!("Ajuste manual por {name}")
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        auth::Role,
        test::ledger::{FailAt, MemoryLedgerStore},
    };

    fn admin() -> Identity {
        Identity {
            user_id: UserId::new(1),
            display_name: "Marta".to_string(),
            role: Some(Role::Administrator),
        }
    }

    fn adjustment(product: i32, quantity: i64) -> StockAdjustment {
        StockAdjustment {
            product_id: ProductId::new(product),
            new_quantity: quantity,
            note: None,
        }
    }

    #[tokio::test]
    async fn first_adjustment_starts_from_zero() -> TestResult {
        let store = MemoryLedgerStore::with_products([7]);
        let ledger = StockLedger::new(Arc::new(store.clone()));

        let outcome = ledger.adjust(adjustment(7, 12), &admin()).await?;

        assert_eq!(
            outcome,
            AdjustmentOutcome {
                previous_quantity: 0,
                new_quantity: 12,
                delta: 12,
            }
        );
        assert_eq!(store.stock(ProductId::new(7)).await, Some(12));

        Ok(())
    }

    #[tokio::test]
    async fn deltas_sum_to_current_stock() -> TestResult {
        let store = MemoryLedgerStore::with_products([3]);
        let ledger = StockLedger::new(Arc::new(store.clone()));

        for quantity in [10, 4, 25, 0, 9] {
            let outcome = ledger.adjust(adjustment(3, quantity), &admin()).await?;

            assert_eq!(
                outcome.new_quantity - outcome.previous_quantity,
                outcome.delta
            );
        }

        let movements = store.movements().await;
        let total: i32 = movements.iter().map(|movement| movement.quantity).sum();

        assert_eq!(movements.len(), 5);
        assert_eq!(Some(total), store.stock(ProductId::new(3)).await);
        assert_eq!(total, 9);

        Ok(())
    }

    #[tokio::test]
    async fn failed_movement_append_rolls_back_stock() -> TestResult {
        let store = MemoryLedgerStore::with_products([5]);
        let ledger = StockLedger::new(Arc::new(store.clone()));

        ledger.adjust(adjustment(5, 8), &admin()).await?;

        store.fail_at(FailAt::AppendMovement).await;

        let result = ledger.adjust(adjustment(5, 20), &admin()).await;

        assert!(matches!(result, Err(InventoryServiceError::Store(_))));
        assert_eq!(store.stock(ProductId::new(5)).await, Some(8));
        assert_eq!(store.movements().await.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn failed_commit_leaves_nothing_behind() {
        let store = MemoryLedgerStore::with_products([5]);
        let ledger = StockLedger::new(Arc::new(store.clone()));

        store.fail_at(FailAt::Commit).await;

        let result = ledger.adjust(adjustment(5, 20), &admin()).await;

        assert!(result.is_err());
        assert_eq!(store.stock(ProductId::new(5)).await, None);
        assert!(store.movements().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let store = MemoryLedgerStore::with_products([1]);
        let ledger = StockLedger::new(Arc::new(store));

        let result = ledger.adjust(adjustment(99, 3), &admin()).await;

        assert!(matches!(result, Err(InventoryServiceError::ProductNotFound)));
    }

    #[tokio::test]
    async fn unknown_actor_is_a_store_error_not_a_missing_product() {
        let store = MemoryLedgerStore::with_products([4]);
        let ledger = StockLedger::new(Arc::new(store.clone()));

        store
            .fail_at_with(FailAt::AppendMovement, || StoreError::InvalidReference)
            .await;

        let result = ledger.adjust(adjustment(4, 6), &admin()).await;

        assert!(matches!(
            result,
            Err(InventoryServiceError::Store(StoreError::InvalidReference))
        ));
        assert_eq!(store.stock(ProductId::new(4)).await, None);
    }

    #[tokio::test]
    async fn quantity_outside_stock_range_is_rejected() {
        let store = MemoryLedgerStore::with_products([1]);
        let ledger = StockLedger::new(Arc::new(store.clone()));

        let result = ledger
            .adjust(adjustment(1, i64::from(i32::MAX) + 1), &admin())
            .await;

        assert!(matches!(result, Err(InventoryServiceError::InvalidQuantity)));
        assert!(store.movements().await.is_empty());
    }

    #[tokio::test]
    async fn delta_overflow_is_rejected_and_rolled_back() -> TestResult {
        let store = MemoryLedgerStore::with_products([1]);
        let ledger = StockLedger::new(Arc::new(store.clone()));

        ledger.adjust(adjustment(1, i64::from(i32::MIN)), &admin()).await?;

        let result = ledger.adjust(adjustment(1, i64::from(i32::MAX)), &admin()).await;

        assert!(matches!(result, Err(InventoryServiceError::InvalidQuantity)));
        assert_eq!(store.stock(ProductId::new(1)).await, Some(i32::MIN));

        Ok(())
    }

    #[tokio::test]
    async fn notes_default_to_the_actor_name() -> TestResult {
        let store = MemoryLedgerStore::with_products([2]);
        let ledger = StockLedger::new(Arc::new(store.clone()));

        ledger.adjust(adjustment(2, 1), &admin()).await?;

        let nameless = Identity {
            display_name: String::new(),
            ..admin()
        };

        ledger.adjust(adjustment(2, 2), &nameless).await?;

        ledger
            .adjust(
                StockAdjustment {
                    note: Some("Conteo físico".to_string()),
                    ..adjustment(2, 3)
                },
                &admin(),
            )
            .await?;

        let notes: Vec<String> = store
            .movements()
            .await
            .into_iter()
            .map(|movement| movement.note)
            .collect();

        assert_eq!(
            notes,
            vec![
                "Ajuste manual por Marta".to_string(),
                "Ajuste manual por usuario".to_string(),
                "Conteo físico".to_string(),
            ]
        );

        Ok(())
    }
}
