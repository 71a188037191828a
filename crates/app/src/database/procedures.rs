//! Stored procedure catalogue and execution mode.

use sqlx::{PgPool, query_scalar};

use crate::database::errors::{StoreError, is_undefined_function};

const INSTALLED_PROCEDURES_SQL: &str = include_str!("sql/installed_procedures.sql");

/// How writes backed by a stored procedure are executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ProcedureMode {
    /// Call the `sp_*` function.
    #[default]
    Procedures,

    /// Run the equivalent inline statements.
    Inline,
}

/// A named stored procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Procedure(&'static str);

impl Procedure {
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }

    /// Map an error raised while calling this procedure.
    #[must_use]
    pub fn call_error(self, error: sqlx::Error) -> StoreError {
        if is_undefined_function(&error) {
            return StoreError::ProcedureNotFound(self.0);
        }

        StoreError::from(error)
    }
}

pub const REGISTER_USER: Procedure = Procedure("sp_registrar_usuario");
pub const VALIDATE_LOGIN: Procedure = Procedure("sp_validar_login");
pub const LIST_PRODUCTS: Procedure = Procedure("sp_obtener_productos");
pub const CREATE_PRODUCT: Procedure = Procedure("sp_crear_producto");
pub const UPDATE_PRODUCT: Procedure = Procedure("sp_actualizar_producto");
pub const CREATE_SALE: Procedure = Procedure("sp_crear_venta");
pub const CREATE_ENTRY: Procedure = Procedure("sp_crear_entrada");
pub const CREATE_CUSTOMER: Procedure = Procedure("sp_crear_cliente");
pub const UPDATE_CUSTOMER: Procedure = Procedure("sp_actualizar_cliente");
pub const DELETE_CUSTOMER: Procedure = Procedure("sp_eliminar_cliente");

/// Every procedure the services may call.
pub const ALL_PROCEDURES: [Procedure; 10] = [
    REGISTER_USER,
    VALIDATE_LOGIN,
    LIST_PRODUCTS,
    CREATE_PRODUCT,
    UPDATE_PRODUCT,
    CREATE_SALE,
    CREATE_ENTRY,
    CREATE_CUSTOMER,
    UPDATE_CUSTOMER,
    DELETE_CUSTOMER,
];

/// Report which known procedures are not installed in the connected database.
///
/// # Errors
///
/// Returns an error if the catalogue query fails.
pub async fn missing_procedures(pool: &PgPool) -> Result<Vec<Procedure>, sqlx::Error> {
    let names: Vec<String> = ALL_PROCEDURES
        .iter()
        .map(|procedure| procedure.name().to_string())
        .collect();

    let installed: Vec<String> = query_scalar(INSTALLED_PROCEDURES_SQL)
        .bind(names)
        .fetch_all(pool)
        .await?;

    Ok(absent_from(&installed))
}

fn absent_from(installed: &[String]) -> Vec<Procedure> {
    ALL_PROCEDURES
        .into_iter()
        .filter(|procedure| !installed.iter().any(|name| name == procedure.name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_from_lists_uninstalled_procedures() {
        let installed: Vec<String> = ALL_PROCEDURES
            .iter()
            .filter(|procedure| **procedure != CREATE_SALE)
            .map(|procedure| procedure.name().to_string())
            .collect();

        assert_eq!(absent_from(&installed), vec![CREATE_SALE]);
        assert_eq!(absent_from(&[]).len(), ALL_PROCEDURES.len());
    }

    #[test]
    fn call_error_keeps_ordinary_errors() {
        let error = CREATE_PRODUCT.call_error(sqlx::Error::RowNotFound);

        assert!(matches!(error, StoreError::NotFound));
    }
}
