//! State

use std::sync::Arc;

use caja_app::{
    auth::{AuthService, TokenAuthority},
    context::AppContext,
    domain::{
        audit::AuditService, catalog::CatalogService, customers::CustomersService,
        entries::EntriesService, inventory::InventoryService, products::ProductsService,
        sales::SalesService, suppliers::SuppliersService,
    },
};

/// Services shared by every handler.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) tokens: Arc<TokenAuthority>,
    pub(crate) auth: Arc<dyn AuthService>,
    pub(crate) products: Arc<dyn ProductsService>,
    pub(crate) inventory: Arc<dyn InventoryService>,
    pub(crate) sales: Arc<dyn SalesService>,
    pub(crate) entries: Arc<dyn EntriesService>,
    pub(crate) customers: Arc<dyn CustomersService>,
    pub(crate) suppliers: Arc<dyn SuppliersService>,
    pub(crate) catalog: Arc<dyn CatalogService>,
    pub(crate) audit: Arc<dyn AuditService>,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self {
            tokens: app.tokens,
            auth: app.auth,
            products: app.products,
            inventory: app.inventory,
            sales: app.sales,
            entries: app.entries,
            customers: app.customers,
            suppliers: app.suppliers,
            catalog: app.catalog,
            audit: app.audit,
        })
    }
}
