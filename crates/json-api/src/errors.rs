//! JSON error responses.

use std::error::Error as StdError;

use salvo::{
    http::StatusCode,
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use caja_app::database::StoreError;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorBody {
    /// Human readable message
    pub error: String,

    /// Diagnostic detail for server errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detalle: Option<String>,
}

/// An error rendered as `{"error": ..., "detalle"?: ...}`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{status}: {}", body.error)]
pub(crate) struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.into(),
                detalle: None,
            },
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub(crate) fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// A logged 500 carrying the error chain as `detalle`.
    pub(crate) fn internal(context: &str, source: &(dyn StdError + 'static)) -> Self {
        let detail = describe(source);

        error!(detail = %detail, "{context}");

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                error: context.to_string(),
                detalle: Some(detail),
            },
        }
    }

    /// A logged 500 with no underlying error to report.
    pub(crate) fn internal_message(context: &str) -> Self {
        error!("{context}");

        Self::new(StatusCode::INTERNAL_SERVER_ERROR, context)
    }

    /// Map a storage failure. `context` becomes the message of a 500.
    pub(crate) fn from_store(context: &str, error: &StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::not_found("Registro no encontrado"),
            StoreError::AlreadyExists => Self::conflict("El registro ya existe"),
            StoreError::InUse => Self::conflict("El registro está en uso"),
            StoreError::InvalidReference => Self::bad_request("Referencia a un registro inexistente"),
            StoreError::MissingRequiredData | StoreError::InvalidData => {
                Self::bad_request("Datos inválidos")
            }
            StoreError::ProcedureNotFound(_) | StoreError::Sql(_) => Self::internal(context, error),
        }
    }

    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }

    pub(crate) fn message(&self) -> &str {
        &self.body.error
    }
}

/// Join an error and its sources with `": "`.
fn describe(error: &(dyn StdError + 'static)) -> String {
    let mut detail = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }

    detail
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(self.body));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Bad Request"),
            (StatusCode::UNAUTHORIZED, "Unauthorized"),
            (StatusCode::FORBIDDEN, "Forbidden"),
            (StatusCode::NOT_FOUND, "Not Found"),
            (StatusCode::CONFLICT, "Conflict"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description)
                    .add_content("application/json", ErrorBody::to_schema(components)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn fails() -> Result<&'static str, ApiError> {
        Err(ApiError::from_store(
            "Error al crear cliente",
            &StoreError::ProcedureNotFound("sp_crear_cliente"),
        ))
    }

    #[tokio::test]
    async fn server_errors_carry_a_detail() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .send(&Service::new(Router::new().get(fails)))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body.error, "Error al crear cliente");
        assert!(
            body.detalle
                .as_deref()
                .is_some_and(|detail| detail.contains("sp_crear_cliente")),
            "detail should include the source error"
        );

        Ok(())
    }

    #[test]
    fn client_errors_have_no_detail() {
        let error = ApiError::from_store("Error al crear cliente", &StoreError::AlreadyExists);

        assert_eq!(error.status(), StatusCode::CONFLICT);
        assert_eq!(error.body.detalle, None);
    }

    #[test]
    fn in_use_rows_are_conflicts() {
        let error = ApiError::from_store("Error al eliminar categoría", &StoreError::InUse);

        assert_eq!(error.status(), StatusCode::CONFLICT);
        assert_eq!(error.message(), "El registro está en uso");
    }

    #[test]
    fn display_shows_status_and_message() {
        let error = ApiError::bad_request("Falta nombre_cliente");

        assert_eq!(error.to_string(), "400 Bad Request: Falta nombre_cliente");
    }

    #[test]
    fn converts_into_a_test_error() {
        fn validate() -> TestResult {
            let lookup: Result<(), ApiError> = Err(ApiError::not_found("Registro no encontrado"));

            lookup?;

            Ok(())
        }

        assert!(validate().is_err(), "api errors should propagate with ?");
    }
}
