//! Customers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
mod models;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use serde_json::json;

    pub(super) fn customer_body() -> serde_json::Value {
        json!({
            "nombre_cliente": "Ferretería Luna",
            "rfc": "FLU010101AAA",
            "correo": "compras@luna.mx",
            "telefono": "5550001111"
        })
    }
}
