//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use caja_app::auth::{AuthServiceError, NewUser};

use crate::{errors::ApiError, extensions::*, state::State};

const CONTEXT: &str = "Error al registrar el usuario";

/// Register Request
#[derive(Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    #[serde(default)]
    pub nombre_usuario: Option<String>,
    #[serde(default)]
    pub nombre_acceso: Option<String>,
    #[serde(default)]
    pub contrasena: Option<String>,
    #[serde(default)]
    pub id_rol: Option<i32>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("nombre_acceso", &self.nombre_acceso)
            .field("id_rol", &self.id_rol)
            .finish_non_exhaustive()
    }
}

impl TryFrom<RegisterRequest> for NewUser {
    type Error = ApiError;

    fn try_from(request: RegisterRequest) -> Result<Self, Self::Error> {
        let present = |value: Option<String>| value.filter(|value| !value.trim().is_empty());

        match (
            present(request.nombre_usuario),
            present(request.nombre_acceso),
            present(request.contrasena),
            request.id_rol,
        ) {
            (Some(display_name), Some(login), Some(password), Some(role_id)) => Ok(NewUser {
                display_name,
                login,
                password,
                role_id,
                email: request.correo,
                phone: request.telefono,
            }),
            _ => Err(ApiError::bad_request(
                "Faltan campos obligatorios: nombre_usuario, nombre_acceso, contrasena, id_rol",
            )),
        }
    }
}

/// Registered Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisteredResponse {
    pub mensaje: String,
    pub id_usuario: i32,
}

/// Register Handler
///
/// Creates a user with a hashed password.
#[endpoint(tags("auth"), summary = "Register User")]
#[tracing::instrument(name = "auth.register", skip(json, depot, res), err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RegisteredResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = NewUser::try_from(json.into_inner())?;

    let id = match state.auth.register(user).await {
        Ok(id) => id,
        Err(AuthServiceError::Store(error)) => return Err(ApiError::from_store(CONTEXT, &error)),
        Err(error) => return Err(ApiError::internal(CONTEXT, &error)),
    };

    tracing::info!(user_id = %id, "registered user");

    res.status_code(StatusCode::CREATED);

    Ok(Json(RegisteredResponse {
        mensaje: "Usuario registrado con éxito".to_string(),
        id_usuario: id.into_inner(),
    }))
}
