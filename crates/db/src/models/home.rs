//! Home page carousel images and ticker headlines.

use pwatch_core::media::{MediaFields, MediaUrlBuilder};
use pwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `hero_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HeroImage {
    pub id: DbId,
    pub title: String,
    pub image: String,
    pub order: i32,
    pub is_active: bool,
    pub alt_text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaFields for HeroImage {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        media.rewrite_required(&mut self.image);
    }
}

/// A row from the `headlines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Headline {
    pub id: DbId,
    pub text: String,
    pub is_bold: bool,
    pub order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHeroImage {
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub image: String,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
    #[validate(length(max = 200))]
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateHeroImage {
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub image: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
    #[validate(length(max = 200))]
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHeadline {
    #[validate(length(min = 1, max = 500))]
    pub text: String,
    pub is_bold: Option<bool>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateHeadline {
    #[validate(length(min = 1, max = 500))]
    pub text: Option<String>,
    pub is_bold: Option<bool>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}
