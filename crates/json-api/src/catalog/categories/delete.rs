//! Delete Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use caja_app::domain::catalog::records::CategoryRecord;

use crate::{
    catalog::categories::CategoryChangedResponse, errors::ApiError, extensions::*, state::State,
};

/// Delete Category Handler
///
/// Categories still referenced by products cannot be deleted.
#[endpoint(
    tags("catalog"),
    summary = "Delete Category",
    security(("bearer_auth" = [])),
)]
#[tracing::instrument(name = "categories.delete", skip(id, depot), err(Debug))]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CategoryChangedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let category = id.into_id::<CategoryRecord>("ID de categoría inválido")?;

    state
        .catalog
        .delete_category(category)
        .await
        .or_store_error("Error al eliminar categoría")?;

    Ok(Json(CategoryChangedResponse::new(
        "Categoría eliminada",
        category.into_inner(),
    )))
}
