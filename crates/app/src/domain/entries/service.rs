//! Purchase entries service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use sqlx::{Postgres, query_scalar};

use crate::{
    auth::UserId,
    database::{CREATE_ENTRY, Db, StoreError},
    domain::entries::records::{EntryId, NewEntry},
    ids::TypedId,
};

const CREATE_ENTRY_SQL: &str = include_str!("sql/create_entry.sql");

#[derive(Debug, Clone)]
pub struct PgEntriesService {
    db: Db,
}

impl PgEntriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EntriesService for PgEntriesService {
    async fn create_entry(&self, entry: NewEntry, actor: UserId) -> Result<EntryId, StoreError> {
        let products: Vec<i32> = entry
            .lines
            .iter()
            .map(|line| line.product_id.into_inner())
            .collect();
        let quantities: Vec<i32> = entry.lines.iter().map(|line| line.quantity).collect();
        let costs: Vec<Decimal> = entry.lines.iter().map(|line| line.unit_cost).collect();
        let prices: Vec<Option<Decimal>> = entry.lines.iter().map(|line| line.unit_price).collect();

        let mut tx = self.db.begin().await?;

        let created = query_scalar::<Postgres, i32>(CREATE_ENTRY_SQL)
            .bind(entry.supplier_id.map(TypedId::into_inner))
            .bind(actor.into_inner())
            .bind(entry.total)
            .bind(products)
            .bind(quantities)
            .bind(costs)
            .bind(prices)
            .fetch_one(&mut *tx)
            .await
            .map(EntryId::new)
            .map_err(|error| CREATE_ENTRY.call_error(error))?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait EntriesService: Send + Sync {
    /// Record goods received and add them to stock.
    async fn create_entry(&self, entry: NewEntry, actor: UserId) -> Result<EntryId, StoreError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::Role,
        domain::{
            entries::records::EntryLine,
            inventory::{
                InventoryService,
                data::{InventoryFilter, MovementFilter},
                records::MovementKind,
            },
            products::records::ProductId,
        },
        pagination::PageRequest,
        test::{TestContext, helpers},
    };

    use super::*;

    fn entry(lines: Vec<EntryLine>) -> NewEntry {
        NewEntry {
            supplier_id: None,
            total: Decimal::new(5000, 2),
            lines,
        }
    }

    fn line(product: ProductId, quantity: i32) -> EntryLine {
        EntryLine {
            product_id: product,
            quantity,
            unit_cost: Decimal::new(500, 2),
            unit_price: None,
        }
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn entries_add_stock_and_log_movements() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::sign_up(&ctx, "admin", Role::Administrator).await;
        let product = helpers::create_product(&ctx, "P-001", "Arroz").await;

        let first = ctx
            .entries
            .create_entry(entry(vec![line(product, 6)]), admin.user_id)
            .await?;
        ctx.entries
            .create_entry(entry(vec![line(product, 4)]), admin.user_id)
            .await?;

        let page = ctx
            .inventory
            .list_movements(
                MovementFilter {
                    product_id: Some(product),
                    kind: Some(MovementKind::Entry),
                    ..MovementFilter::default()
                },
                PageRequest::default(),
            )
            .await?;

        let total: i32 = page.items.iter().map(|movement| movement.quantity).sum();
        let first_note = format!("Entrada #{first}");

        assert_eq!(page.total, 2);
        assert_eq!(total, 10);
        assert!(
            page.items
                .iter()
                .any(|movement| movement.note.as_deref() == Some(first_note.as_str())),
            "movement should reference its entry"
        );

        let inventory = ctx
            .inventory
            .list_inventory(InventoryFilter::default(), PageRequest::default())
            .await?;

        assert_eq!(
            inventory.items.first().and_then(|item| item.current_quantity),
            Some(10)
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn entries_without_lines_are_rejected() {
        let ctx = TestContext::new().await;
        let admin = helpers::sign_up(&ctx, "admin", Role::Administrator).await;

        let result = ctx.entries.create_entry(entry(Vec::new()), admin.user_id).await;

        assert!(matches!(result, Err(StoreError::InvalidData)));
    }
}
