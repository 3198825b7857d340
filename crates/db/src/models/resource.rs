//! Downloadable resource documents (explainers, reports, partner
//! publications, statements), stored in one table keyed by `kind`.

use pwatch_core::media::{MediaFields, MediaUrlBuilder};
use pwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `resource_documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResourceDocument {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub kind: String,
    pub name: String,
    pub description: String,
    pub file: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaFields for ResourceDocument {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        media.rewrite_required(&mut self.file);
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateResourceDocument {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub file: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateResourceDocument {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub file: Option<String>,
}
