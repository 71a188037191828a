//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::UserId,
    database::{Db, ProcedureMode, StoreError},
    domain::products::{
        data::ProductData,
        records::{Product, ProductId},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    mode: ProcedureMode,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db, mode: ProcedureMode) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            mode,
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let mut conn = self.db.pool().acquire().await?;

        self.repository.list_products(&mut conn).await
    }

    async fn create_product(&self, product: ProductData) -> Result<ProductId, StoreError> {
        let mut tx = self.db.begin().await?;

        let created = match self.mode {
            ProcedureMode::Procedures => {
                self.repository
                    .call_create_product(&mut tx, &product)
                    .await?
            }
            ProcedureMode::Inline => self.repository.insert_product(&mut tx, &product).await?,
        };

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductId,
        data: ProductData,
        actor: UserId,
    ) -> Result<ProductId, StoreError> {
        let mut tx = self.db.begin().await?;

        let updated = match self.mode {
            ProcedureMode::Procedures => {
                self.repository
                    .call_update_product(&mut tx, product, &data, actor)
                    .await?
            }
            ProcedureMode::Inline => {
                self.repository
                    .replace_product(&mut tx, product, &data)
                    .await?
            }
        };

        let updated = updated.ok_or(StoreError::NotFound)?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products with their stock.
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Creates a product, returning its id.
    async fn create_product(&self, product: ProductData) -> Result<ProductId, StoreError>;

    /// Replaces every writable field of a product.
    async fn update_product(
        &self,
        product: ProductId,
        data: ProductData,
        actor: UserId,
    ) -> Result<ProductId, StoreError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::Role,
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn writes_behave_the_same_in_both_modes() -> TestResult {
        for mode in [ProcedureMode::Procedures, ProcedureMode::Inline] {
            let ctx = TestContext::with_mode(mode).await;
            let admin = helpers::sign_up(&ctx, "admin", Role::Administrator).await;

            let id = ctx
                .products
                .create_product(helpers::product_data("P-001", "Jabón"))
                .await?;

            let updated = ctx
                .products
                .update_product(
                    id,
                    ProductData {
                        active: false,
                        ..helpers::product_data("P-001", "Jabón neutro")
                    },
                    admin.user_id,
                )
                .await?;

            assert_eq!(updated, id, "{mode:?}");

            let products = ctx.products.list_products().await?;
            let product = products.iter().find(|product| product.id == id);

            assert_eq!(
                product.map(|product| (product.name.as_str(), product.active)),
                Some(("Jabón neutro", false)),
                "{mode:?}"
            );
            assert_eq!(product.and_then(|product| product.stock), None, "{mode:?}");
        }

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn updating_a_missing_product_is_not_found() {
        for mode in [ProcedureMode::Procedures, ProcedureMode::Inline] {
            let ctx = TestContext::with_mode(mode).await;
            let admin = helpers::sign_up(&ctx, "admin", Role::Administrator).await;

            let result = ctx
                .products
                .update_product(
                    ProductId::new(404),
                    helpers::product_data("P-404", "Fantasma"),
                    admin.user_id,
                )
                .await;

            assert!(matches!(result, Err(StoreError::NotFound)), "{mode:?}");
        }
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn duplicate_codes_already_exist() {
        for mode in [ProcedureMode::Procedures, ProcedureMode::Inline] {
            let ctx = TestContext::with_mode(mode).await;

            helpers::create_product(&ctx, "P-001", "Jabón").await;

            let result = ctx
                .products
                .create_product(helpers::product_data("P-001", "Otro jabón"))
                .await;

            assert!(matches!(result, Err(StoreError::AlreadyExists)), "{mode:?}");
        }
    }
}
