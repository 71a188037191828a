//! Test Helpers

use rust_decimal::Decimal;
use sqlx::query_scalar;

use crate::{
    auth::{AuthService, Credentials, Identity, NewUser, Role},
    domain::products::{
        ProductsService,
        data::{DEFAULT_MINIMUM_STOCK, ProductData},
        records::ProductId,
    },
    test::TestContext,
};

pub(crate) const PASSWORD: &str = "clave-de-prueba";

pub(crate) async fn role_id(ctx: &TestContext, role: Role) -> i32 {
    query_scalar("SELECT id_rol FROM roles WHERE nombre_rol = $1")
        .bind(role.as_str())
        .fetch_one(ctx.db.pool())
        .await
        .expect("seeded role should exist")
}

/// Register a user and log in as them.
pub(crate) async fn sign_up(ctx: &TestContext, login: &str, role: Role) -> Identity {
    let role_id = role_id(ctx, role).await;

    ctx.auth
        .register(NewUser {
            display_name: format!("Usuario {login}"),
            login: login.to_string(),
            password: PASSWORD.to_string(),
            role_id,
            email: None,
            phone: None,
        })
        .await
        .expect("user should register");

    ctx.auth
        .login(Credentials {
            login: login.to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .expect("user should log in")
        .identity
}

pub(crate) fn product_data(code: &str, name: &str) -> ProductData {
    ProductData {
        code: code.to_string(),
        name: name.to_string(),
        sale_price: Decimal::new(1250, 2),
        purchase_price: Decimal::new(900, 2),
        category_id: None,
        brand_id: None,
        image_url: None,
        minimum_stock: DEFAULT_MINIMUM_STOCK,
        active: true,
    }
}

pub(crate) async fn create_product(ctx: &TestContext, code: &str, name: &str) -> ProductId {
    ctx.products
        .create_product(product_data(code, name))
        .await
        .expect("product should be created")
}
