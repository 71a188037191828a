//! Sales service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{Identity, Role, UserId},
    database::{Db, StoreError},
    domain::sales::{
        data::{NewSale, SaleFilter},
        records::{SaleId, SaleSummary},
        repository::PgSalesRepository,
    },
    pagination::{PageRequest, Paginated},
};

#[derive(Debug, Clone)]
pub struct PgSalesService {
    db: Db,
    repository: PgSalesRepository,
}

impl PgSalesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSalesRepository::new(),
        }
    }
}

#[async_trait]
impl SalesService for PgSalesService {
    async fn create_sale(&self, sale: NewSale, actor: UserId) -> Result<SaleId, StoreError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_sale(&mut tx, &sale, actor).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn sales_history(
        &self,
        filter: SaleFilter,
        page: PageRequest,
        viewer: Identity,
    ) -> Result<Paginated<SaleSummary>, StoreError> {
        Ok(self
            .repository
            .list_sales(self.db.pool(), &filter, seller_scope(&viewer), page)
            .await?)
    }
}

/// Sellers only ever see their own sales.
fn seller_scope(viewer: &Identity) -> Option<UserId> {
    match viewer.role {
        Some(Role::Seller) => Some(viewer.user_id),
        Some(Role::Administrator) | None => None,
    }
}

#[automock]
#[async_trait]
pub trait SalesService: Send + Sync {
    /// Record a sale and its lines, discounting stock.
    async fn create_sale(&self, sale: NewSale, actor: UserId) -> Result<SaleId, StoreError>;

    /// Sales newest first, as visible to `viewer`.
    async fn sales_history(
        &self,
        filter: SaleFilter,
        page: PageRequest,
        viewer: Identity,
    ) -> Result<Paginated<SaleSummary>, StoreError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{
            inventory::{
                InventoryService,
                data::{MovementFilter, StockAdjustment},
                records::MovementKind,
            },
            products::records::ProductId,
            sales::data::SaleLine,
        },
        test::{TestContext, helpers},
    };

    use super::*;

    fn sale_of(product: ProductId, quantity: i32) -> NewSale {
        let unit_price = Decimal::new(1250, 2);
        let subtotal = unit_price * Decimal::from(quantity);

        NewSale {
            customer_id: None,
            total: subtotal,
            payment_method: "efectivo".to_string(),
            lines: vec![SaleLine {
                product_id: product,
                quantity,
                unit_price,
                unit_cost: Decimal::new(900, 2),
                subtotal,
            }],
        }
    }

    fn viewer(role: Option<Role>) -> Identity {
        Identity {
            user_id: UserId::new(4),
            display_name: "Eva".to_string(),
            role,
        }
    }

    #[test]
    fn sellers_are_scoped_to_their_own_sales() {
        assert_eq!(
            seller_scope(&viewer(Some(Role::Seller))),
            Some(UserId::new(4))
        );
    }

    #[test]
    fn administrators_see_every_sale() {
        assert_eq!(seller_scope(&viewer(Some(Role::Administrator))), None);
        assert_eq!(seller_scope(&viewer(None)), None);
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn sales_discount_stock_and_log_a_movement() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::sign_up(&ctx, "admin", Role::Administrator).await;
        let product = helpers::create_product(&ctx, "D-001", "Detergente").await;

        ctx.inventory
            .adjust_stock(
                StockAdjustment {
                    product_id: product,
                    new_quantity: 10,
                    note: None,
                },
                admin.clone(),
            )
            .await?;

        let sale = ctx.sales.create_sale(sale_of(product, 3), admin.user_id).await?;

        let movements = ctx
            .inventory
            .list_movements(
                MovementFilter {
                    product_id: Some(product),
                    kind: Some(MovementKind::Sale),
                    ..MovementFilter::default()
                },
                PageRequest::default(),
            )
            .await?;

        let movement = movements.items.first().ok_or("sale movement missing")?;

        assert_eq!(movements.total, 1);
        assert_eq!(movement.quantity, -3);
        assert_eq!(movement.note.as_deref(), Some(format!("Venta #{sale}").as_str()));

        let all = ctx
            .inventory
            .list_movements(
                MovementFilter {
                    product_id: Some(product),
                    ..MovementFilter::default()
                },
                PageRequest::default(),
            )
            .await?;

        let stock: i32 = all.items.iter().map(|m| m.quantity).sum();

        assert_eq!(stock, 7, "movement deltas should add up to the stock");

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn sellers_only_see_their_own_history() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::sign_up(&ctx, "admin", Role::Administrator).await;
        let seller = helpers::sign_up(&ctx, "vendedor", Role::Seller).await;
        let product = helpers::create_product(&ctx, "E-001", "Escoba").await;

        ctx.sales.create_sale(sale_of(product, 1), admin.user_id).await?;
        ctx.sales.create_sale(sale_of(product, 2), seller.user_id).await?;

        let own = ctx
            .sales
            .sales_history(SaleFilter::default(), PageRequest::default(), seller.clone())
            .await?;

        let everything = ctx
            .sales
            .sales_history(SaleFilter::default(), PageRequest::default(), admin)
            .await?;

        assert_eq!(own.total, 1);
        assert!(own.items.iter().all(|sale| sale.user_id == seller.user_id));
        assert_eq!(everything.total, 2);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn sales_without_lines_are_rejected() {
        let ctx = TestContext::new().await;
        let admin = helpers::sign_up(&ctx, "admin", Role::Administrator).await;

        let mut sale = sale_of(ProductId::new(1), 1);
        sale.lines.clear();

        let result = ctx.sales.create_sale(sale, admin.user_id).await;

        assert!(matches!(result, Err(StoreError::InvalidData)));
    }
}
