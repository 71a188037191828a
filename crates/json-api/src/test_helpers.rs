//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use caja_app::{
    auth::{
        AuthServiceError, DEFAULT_TOKEN_TTL, Identity, JwtSecret, MockAuthService, Role,
        TokenAuthority, UserId,
    },
    domain::{
        audit::MockAuditService, catalog::MockCatalogService, customers::MockCustomersService,
        entries::MockEntriesService, inventory::MockInventoryService,
        products::MockProductsService, sales::MockSalesService, suppliers::MockSuppliersService,
    },
};

use crate::state::State;

const TEST_SECRET: &str = "test-secret";

/// Service doubles. Any call without a matching expectation panics.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) products: MockProductsService,
    pub(crate) inventory: MockInventoryService,
    pub(crate) sales: MockSalesService,
    pub(crate) entries: MockEntriesService,
    pub(crate) customers: MockCustomersService,
    pub(crate) suppliers: MockSuppliersService,
    pub(crate) catalog: MockCatalogService,
    pub(crate) audit: MockAuditService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        Arc::new(State {
            tokens: Arc::new(test_tokens()),
            auth: Arc::new(self.auth),
            products: Arc::new(self.products),
            inventory: Arc::new(self.inventory),
            sales: Arc::new(self.sales),
            entries: Arc::new(self.entries),
            customers: Arc::new(self.customers),
            suppliers: Arc::new(self.suppliers),
            catalog: Arc::new(self.catalog),
            audit: Arc::new(self.audit),
        })
    }
}

pub(crate) fn test_tokens() -> TokenAuthority {
    TokenAuthority::new(&JwtSecret::new(TEST_SECRET), DEFAULT_TOKEN_TTL)
}

pub(crate) fn test_state() -> Arc<State> {
    Mocks::default().into_state()
}

/// An `Authorization` header value for `identity`.
pub(crate) fn bearer(identity: &Identity) -> Result<String, AuthServiceError> {
    let token = test_tokens().issue(identity).map_err(AuthServiceError::Token)?;

    Ok(format!("Bearer {token}"))
}

pub(crate) fn admin() -> Identity {
    Identity {
        user_id: UserId::new(1),
        display_name: "Admin".to_string(),
        role: Some(Role::Administrator),
    }
}

pub(crate) fn seller() -> Identity {
    Identity {
        user_id: UserId::new(2),
        display_name: "Vendedor".to_string(),
        role: Some(Role::Seller),
    }
}

/// Route `route` with `mocks` as state, running as `caller`.
pub(crate) fn service(mocks: Mocks, caller: Identity, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject(caller))
            .push(route),
    )
}

/// Route `route` with `mocks` as state and no caller.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .push(route),
    )
}
