//! Brand Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use caja_app::domain::catalog::records::Brand;

use crate::{errors::ApiError, extensions::*, state::State};

/// Brand Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BrandResponse {
    pub id_marca: i32,
    pub nombre_marca: String,
}

impl From<Brand> for BrandResponse {
    fn from(brand: Brand) -> Self {
        Self {
            id_marca: brand.id.into_inner(),
            nombre_marca: brand.name,
        }
    }
}

/// Brand Index Handler
#[endpoint(
    tags("catalog"),
    summary = "List Brands",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<BrandResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let brands = state
        .catalog
        .list_brands()
        .await
        .or_500("Error al obtener marcas")?;

    Ok(Json(brands.into_iter().map(Into::into).collect()))
}
