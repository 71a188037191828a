//! Category Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

/// Category Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CategoryRequest {
    #[serde(default)]
    pub nombre_categoria: Option<String>,
}

impl CategoryRequest {
    pub(crate) fn into_name(self) -> Result<String, ApiError> {
        self.nombre_categoria
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ApiError::bad_request("Falta nombre_categoria"))
    }
}

/// Category Changed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryChangedResponse {
    pub mensaje: String,
    pub id_categoria: i32,
}

impl CategoryChangedResponse {
    pub(crate) fn new(mensaje: &str, id_categoria: i32) -> Self {
        Self {
            mensaje: mensaje.to_string(),
            id_categoria,
        }
    }
}
