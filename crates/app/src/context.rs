//! App Context

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, TokenAuthority},
    database::{self, Db, PoolSettings, ProcedureMode},
    domain::{
        audit::{AuditService, PgAuditService},
        catalog::{CatalogService, PgCatalogService},
        customers::{CustomersService, PgCustomersService},
        entries::{EntriesService, PgEntriesService},
        inventory::{InventoryService, PgInventoryService},
        products::{PgProductsService, ProductsService},
        sales::{PgSalesService, SalesService},
        suppliers::{PgSuppliersService, SuppliersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Every service the HTTP layer talks to, sharing one connection pool.
#[derive(Clone)]
pub struct AppContext {
    pub pool: PgPool,
    pub tokens: Arc<TokenAuthority>,
    pub auth: Arc<dyn AuthService>,
    pub products: Arc<dyn ProductsService>,
    pub inventory: Arc<dyn InventoryService>,
    pub sales: Arc<dyn SalesService>,
    pub entries: Arc<dyn EntriesService>,
    pub customers: Arc<dyn CustomersService>,
    pub suppliers: Arc<dyn SuppliersService>,
    pub catalog: Arc<dyn CatalogService>,
    pub audit: Arc<dyn AuditService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        settings: PoolSettings,
        mode: ProcedureMode,
        tokens: TokenAuthority,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with(url, settings)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_pool(pool, mode, tokens))
    }

    /// Wire the Postgres services over an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool, mode: ProcedureMode, tokens: TokenAuthority) -> Self {
        let db = Db::new(pool.clone());
        let tokens = Arc::new(tokens);

        Self {
            auth: Arc::new(PgAuthService::new(pool.clone(), Arc::clone(&tokens))),
            products: Arc::new(PgProductsService::new(db.clone(), mode)),
            inventory: Arc::new(PgInventoryService::new(db.clone())),
            sales: Arc::new(PgSalesService::new(db.clone())),
            entries: Arc::new(PgEntriesService::new(db.clone())),
            customers: Arc::new(PgCustomersService::new(db.clone(), mode)),
            suppliers: Arc::new(PgSuppliersService::new(db.clone())),
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            audit: Arc::new(PgAuditService::new(db)),
            tokens,
            pool,
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("pool", &self.pool)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
