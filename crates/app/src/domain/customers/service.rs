//! Customers service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::UserId,
    database::{Db, ProcedureMode, StoreError},
    domain::customers::{
        data::{CustomerData, CustomerFilter},
        records::{Customer, CustomerId},
        repository::{Change, PgCustomersRepository},
    },
    pagination::{PageRequest, Paginated},
};

/// Customer writes are audited in `bitacora_cliente` on both execution paths.
#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
    mode: ProcedureMode,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db, mode: ProcedureMode) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
            mode,
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn list_customers(
        &self,
        filter: CustomerFilter,
        page: PageRequest,
    ) -> Result<Paginated<Customer>, StoreError> {
        Ok(self
            .repository
            .list_customers(self.db.pool(), &filter, page)
            .await?)
    }

    async fn create_customer(
        &self,
        customer: CustomerData,
        actor: UserId,
    ) -> Result<CustomerId, StoreError> {
        let mut tx = self.db.begin().await?;

        let created = match self.mode {
            ProcedureMode::Procedures => {
                self.repository
                    .call_create_customer(&mut tx, &customer, actor)
                    .await?
            }
            ProcedureMode::Inline => {
                let created = self.repository.insert_customer(&mut tx, &customer).await?;

                self.repository
                    .record_change(
                        &mut tx,
                        Change::Insert,
                        created,
                        &format!("Alta de cliente {}", customer.name),
                        actor,
                    )
                    .await?;

                created
            }
        };

        tx.commit().await?;

        Ok(created)
    }

    async fn update_customer(
        &self,
        customer: CustomerId,
        data: CustomerData,
        actor: UserId,
    ) -> Result<(), StoreError> {
        let mut tx = self.db.begin().await?;

        let updated = match self.mode {
            ProcedureMode::Procedures => {
                self.repository
                    .call_update_customer(&mut tx, customer, &data, actor)
                    .await?
            }
            ProcedureMode::Inline => {
                let updated = self
                    .repository
                    .replace_customer(&mut tx, customer, &data)
                    .await?;

                if let Some(updated) = updated {
                    self.repository
                        .record_change(
                            &mut tx,
                            Change::Update,
                            updated,
                            &format!("Cambio de cliente {}", data.name),
                            actor,
                        )
                        .await?;
                }

                updated
            }
        };

        if updated.is_none() {
            return Err(StoreError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn delete_customer(&self, customer: CustomerId, actor: UserId) -> Result<(), StoreError> {
        let mut tx = self.db.begin().await?;

        let deleted = match self.mode {
            ProcedureMode::Procedures => {
                self.repository
                    .call_delete_customer(&mut tx, customer, actor)
                    .await?
            }
            ProcedureMode::Inline => {
                let deleted = self
                    .repository
                    .remove_customer(&mut tx, customer)
                    .await
                    .map_err(|error| StoreError::from(error).on_delete())?;

                if let Some(deleted) = deleted {
                    self.repository
                        .record_change(&mut tx, Change::Delete, deleted, "Baja de cliente", actor)
                        .await?;
                }

                deleted
            }
        };

        if deleted.is_none() {
            return Err(StoreError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Customers ordered by name.
    async fn list_customers(
        &self,
        filter: CustomerFilter,
        page: PageRequest,
    ) -> Result<Paginated<Customer>, StoreError>;

    async fn create_customer(
        &self,
        customer: CustomerData,
        actor: UserId,
    ) -> Result<CustomerId, StoreError>;

    async fn update_customer(
        &self,
        customer: CustomerId,
        data: CustomerData,
        actor: UserId,
    ) -> Result<(), StoreError>;

    async fn delete_customer(&self, customer: CustomerId, actor: UserId) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::Role,
        domain::audit::{AuditFilter, AuditService},
        test::{TestContext, helpers},
    };

    use super::*;

    fn customer(name: &str) -> CustomerData {
        CustomerData {
            name: name.to_string(),
            rfc: None,
            email: None,
            phone: None,
            address: None,
        }
    }

    async fn seed_customers(ctx: &TestContext, actor: UserId, count: usize) -> TestResult {
        for index in 1..=count {
            ctx.customers
                .create_customer(customer(&format!("Cliente {index:02}")), actor)
                .await?;
        }

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn pages_walk_the_whole_table() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::sign_up(&ctx, "admin", Role::Administrator).await;

        seed_customers(&ctx, admin.user_id, 25).await?;

        let second = ctx
            .customers
            .list_customers(CustomerFilter::default(), PageRequest::new(Some(2), Some(10)))
            .await?;

        let names: Vec<_> = second.items.iter().map(|c| c.name.as_str()).collect();
        let expected: Vec<_> = (11..=20).map(|index| format!("Cliente {index:02}")).collect();

        assert_eq!(second.total, 25);
        assert_eq!(names, expected);

        let third = ctx
            .customers
            .list_customers(CustomerFilter::default(), PageRequest::new(Some(3), Some(10)))
            .await?;

        assert_eq!(third.items.len(), 5, "last page should hold the remainder");

        let fourth = ctx
            .customers
            .list_customers(CustomerFilter::default(), PageRequest::new(Some(4), Some(10)))
            .await?;

        assert!(fourth.items.is_empty(), "page past the end should be empty");
        assert_eq!(fourth.total, 25);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn search_narrows_the_total() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::sign_up(&ctx, "admin", Role::Administrator).await;

        seed_customers(&ctx, admin.user_id, 12).await?;

        let page = ctx
            .customers
            .list_customers(
                CustomerFilter {
                    search: Some("cliente 1".to_string()),
                },
                PageRequest::default(),
            )
            .await?;

        assert_eq!(page.total, 3, "Cliente 10 to 12 should match");

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn inline_writes_are_audited_like_procedures() -> TestResult {
        for mode in [ProcedureMode::Procedures, ProcedureMode::Inline] {
            let ctx = TestContext::with_mode(mode).await;
            let admin = helpers::sign_up(&ctx, "admin", Role::Administrator).await;

            let id = ctx
                .customers
                .create_customer(customer("Ferreteria Luna"), admin.user_id)
                .await?;

            ctx.customers
                .update_customer(id, customer("Ferreteria Sol"), admin.user_id)
                .await?;

            ctx.customers.delete_customer(id, admin.user_id).await?;

            let log = ctx
                .audit
                .list_audit(AuditFilter::default(), PageRequest::default())
                .await?;

            let operations: Vec<_> = log.items.iter().map(|e| e.operation.as_str()).collect();

            assert_eq!(operations, vec!["DELETE", "UPDATE", "INSERT"], "{mode:?}");
            assert_eq!(
                log.items.last().and_then(|e| e.description.as_deref()),
                Some("Alta de cliente Ferreteria Luna")
            );
            assert!(
                log.items
                    .iter()
                    .all(|e| e.app_user_id == Some(admin.user_id) && e.record_id == Some(id.into_inner())),
                "{mode:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn unknown_customers_are_not_found() {
        for mode in [ProcedureMode::Procedures, ProcedureMode::Inline] {
            let ctx = TestContext::with_mode(mode).await;
            let admin = helpers::sign_up(&ctx, "admin", Role::Administrator).await;

            let updated = ctx
                .customers
                .update_customer(CustomerId::new(999), customer("Nadie"), admin.user_id)
                .await;

            let deleted = ctx
                .customers
                .delete_customer(CustomerId::new(999), admin.user_id)
                .await;

            assert!(matches!(updated, Err(StoreError::NotFound)), "{mode:?}");
            assert!(matches!(deleted, Err(StoreError::NotFound)), "{mode:?}");
        }
    }
}
