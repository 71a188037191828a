//! Rename Category Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use caja_app::domain::catalog::records::CategoryRecord;

use crate::{
    catalog::categories::{CategoryChangedResponse, CategoryRequest},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Rename Category Handler
#[endpoint(
    tags("catalog"),
    summary = "Rename Category",
    security(("bearer_auth" = [])),
)]
#[tracing::instrument(name = "categories.update", skip(id, json, depot), err(Debug))]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryChangedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let category = id.into_id::<CategoryRecord>("ID de categoría inválido")?;
    let name = json.into_inner().into_name()?;

    state
        .catalog
        .rename_category(category, name)
        .await
        .or_store_error("Error al actualizar categoría")?;

    Ok(Json(CategoryChangedResponse::new(
        "Categoría actualizada",
        category.into_inner(),
    )))
}
