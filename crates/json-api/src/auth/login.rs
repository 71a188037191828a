//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use caja_app::auth::{AuthServiceError, Credentials, Identity};

use crate::{errors::ApiError, extensions::*, state::State};

/// Login Request
#[derive(Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    pub nombre_acceso: Option<String>,
    #[serde(default)]
    pub contrasena: Option<String>,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("nombre_acceso", &self.nombre_acceso)
            .finish_non_exhaustive()
    }
}

/// Logged In User
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub id_usuario: i32,
    pub nombre: String,
    pub rol: Option<String>,
}

impl From<Identity> for UserResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id_usuario: identity.user_id.into_inner(),
            nombre: identity.display_name,
            rol: identity.role.map(|role| role.as_str().to_string()),
        }
    }
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    pub mensaje: String,
    pub token: String,
    pub usuario: UserResponse,
}

/// Login Handler
///
/// Verifies a login name and password and issues a session token.
#[endpoint(tags("auth"), summary = "Log In")]
#[tracing::instrument(name = "auth.login", skip(json, depot), err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let (Some(login), Some(password)) = (
        request.nombre_acceso.filter(|value| !value.is_empty()),
        request.contrasena.filter(|value| !value.is_empty()),
    ) else {
        return Err(ApiError::bad_request("Faltan nombre_acceso y contrasena"));
    };

    let outcome = state
        .auth
        .login(Credentials { login, password })
        .await
        .map_err(|error| match error {
            AuthServiceError::UserNotFound => ApiError::not_found("Usuario no encontrado"),
            AuthServiceError::WrongPassword => ApiError::unauthorized("Contraseña incorrecta"),
            other => ApiError::internal("Error en el servidor", &other),
        })?;

    tracing::info!(user_id = %outcome.identity.user_id, "user logged in");

    Ok(Json(LoginResponse {
        mensaje: "Login exitoso".to_string(),
        token: outcome.token,
        usuario: outcome.identity.into(),
    }))
}
