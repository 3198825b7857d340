//! Shared response envelope types for API handlers.
//!
//! Single objects use a `{ "data": ... }` envelope; paginated lists add a
//! `pagination` block next to it.

use pwatch_core::listing::PageInfo;
use pwatch_core::media::{MediaFields, MediaUrlBuilder};
use pwatch_db::listing::Page;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "pagination": {...} }` envelope for list endpoints.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

impl<T: Serialize> From<Page<T>> for PaginatedResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            data: page.items,
            pagination: page.info,
        }
    }
}

impl<T: Serialize + MediaFields> PaginatedResponse<T> {
    /// Build the envelope with every media path rewritten to an absolute URL.
    pub fn with_media(page: Page<T>, media: &MediaUrlBuilder) -> Self {
        let mut response = Self::from(page);
        response.data.absolutize(media);
        response
    }
}

impl<T: Serialize + MediaFields> DataResponse<T> {
    pub fn with_media(mut data: T, media: &MediaUrlBuilder) -> Self {
        data.absolutize(media);
        Self { data }
    }
}
