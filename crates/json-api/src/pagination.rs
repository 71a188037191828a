//! Paginated responses.

use salvo::oapi::{ToSchema, extract::QueryParam};
use serde::{Deserialize, Serialize};

use caja_app::pagination::{PageRequest, Paginated};

/// One page of a listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PageResponse<T: ToSchema + 'static> {
    /// 1-based page number
    pub page: i64,

    /// Page size
    pub limit: i64,

    /// Rows matching the filters across all pages
    pub total: i64,

    pub items: Vec<T>,
}

impl<T: ToSchema + 'static> PageResponse<T> {
    pub(crate) fn from_page<U>(page: Paginated<U>) -> Self
    where
        T: From<U>,
    {
        let page = page.map(T::from);

        Self {
            page: page.page,
            limit: page.limit,
            total: page.total,
            items: page.items,
        }
    }
}

/// Build a page request from `page` and `limit` query parameters.
pub(crate) fn page_request(page: QueryParam<i64, false>, limit: QueryParam<i64, false>) -> PageRequest {
    PageRequest::new(page.into_inner(), limit.into_inner())
}
