//! Shared query parameter types for API handlers.
//!
//! Every list endpoint accepts [`ListParams`]; resource-specific filters are
//! separate structs flattened next to it by the handler modules.

use pwatch_db::listing::ListQuery;
use serde::Deserialize;

/// `?page=&page_size=&search=&ordering=` accepted by every list endpoint.
///
/// Values are clamped and validated in `pwatch_core::listing`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

impl ListParams {
    /// Start a [`ListQuery`] carrying these parameters and no filters.
    pub fn into_query(self) -> ListQuery {
        ListQuery {
            filters: Vec::new(),
            search: self.search,
            ordering: self.ordering,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// `?is_active=` filter shared by the about and home content blocks.
#[derive(Debug, Default, Deserialize)]
pub struct ActiveFilter {
    pub is_active: Option<bool>,
}
