//! API Router

use salvo::Router;

use caja_app::auth::Role;

use crate::{
    audit, auth, auth::gate::RequireRole, catalog, customers, entries, inventory, products, sales,
    suppliers,
};

/// Every `/api` route.
///
/// Paths shared by both groups resolve by method: a request falls through
/// to the administrator group only when no open route matched it.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(Router::with_path("register").post(auth::register::handler))
        .push(Router::with_path("login").post(auth::login::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(any_role_router())
                .push(administrator_router()),
        )
}

fn any_role_router() -> Router {
    Router::new()
        .push(Router::with_path("productos").get(products::index::handler))
        .push(
            Router::with_path("ventas")
                .post(sales::create::handler)
                .push(Router::with_path("history").get(sales::history::handler)),
        )
        .push(Router::with_path("inventario").get(inventory::index::handler))
        .push(Router::with_path("entradas").post(entries::create::handler))
        .push(Router::with_path("clientes").get(customers::index::handler))
        .push(Router::with_path("proveedores").get(suppliers::index::handler))
        .push(Router::with_path("categorias").get(catalog::categories::index::handler))
        .push(Router::with_path("marcas").get(catalog::brands::handler))
}

fn administrator_router() -> Router {
    Router::new()
        .hoop(RequireRole(Role::Administrator))
        .push(
            Router::with_path("productos")
                .post(products::create::handler)
                .push(Router::with_path("{id}").put(products::update::handler)),
        )
        .push(
            Router::with_path("inventario")
                .push(Router::with_path("movimientos").get(inventory::movements::handler))
                .push(Router::with_path("{id}").patch(inventory::adjust::handler)),
        )
        .push(Router::with_path("bitacora").get(audit::index::handler))
        .push(
            Router::with_path("clientes")
                .post(customers::create::handler)
                .push(
                    Router::with_path("{id}")
                        .put(customers::update::handler)
                        .delete(customers::delete::handler),
                ),
        )
        .push(Router::with_path("proveedores").post(suppliers::create::handler))
        .push(
            Router::with_path("categorias")
                .post(catalog::categories::create::handler)
                .push(
                    Router::with_path("{id}")
                        .put(catalog::categories::update::handler)
                        .delete(catalog::categories::delete::handler),
                ),
        )
}
