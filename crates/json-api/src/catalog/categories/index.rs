//! Category Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use caja_app::domain::catalog::records::Category;

use crate::{errors::ApiError, extensions::*, state::State};

/// Category Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub id_categoria: i32,
    pub nombre_categoria: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id_categoria: category.id.into_inner(),
            nombre_categoria: category.name,
        }
    }
}

/// Category Index Handler
#[endpoint(
    tags("catalog"),
    summary = "List Categories",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .catalog
        .list_categories()
        .await
        .or_500("Error al obtener categorias")?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}
