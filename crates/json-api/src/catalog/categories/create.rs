//! Create Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    catalog::categories::{CategoryChangedResponse, CategoryRequest},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Create Category Handler
#[endpoint(
    tags("catalog"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
    ),
)]
#[tracing::instrument(name = "categories.create", skip(json, depot, res), err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryChangedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let name = json.into_inner().into_name()?;

    let id = state
        .catalog
        .create_category(name)
        .await
        .or_store_error("Error al crear categoría")?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(CategoryChangedResponse::new(
        "Categoría creada",
        id.into_inner(),
    )))
}
