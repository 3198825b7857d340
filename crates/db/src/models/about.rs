//! About-page models: objectives, team, who-we-are, story, differentiators
//! and partners.
//!
//! All six are ordered, toggleable content blocks; public listings only see
//! rows with `is_active = true`.

use pwatch_core::media::{MediaFields, MediaUrlBuilder};
use pwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from `objectives` or `what_sets_us_apart`; both tables share
/// this shape.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Highlight {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub order: i32,
    pub icon: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `team_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamMember {
    pub id: DbId,
    pub name: String,
    pub title: String,
    pub bio: String,
    pub photo: Option<String>,
    pub email: String,
    pub phone: String,
    pub linkedin_url: String,
    pub twitter_url: String,
    pub facebook_url: String,
    pub order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaFields for TeamMember {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        media.rewrite(&mut self.photo);
    }
}

/// A row from the `who_we_are` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WhoWeAre {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaFields for WhoWeAre {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        media.rewrite(&mut self.image);
    }
}

/// A row from the `our_story` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OurStory {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub year: Option<i32>,
    pub image: Option<String>,
    pub order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaFields for OurStory {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        media.rewrite(&mut self.image);
    }
}

/// A row from the `partners` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Partner {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub website_url: String,
    pub order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaFields for Partner {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        media.rewrite(&mut self.logo);
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating an objective or a "what sets us apart" entry; the two
/// share the same shape.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHighlight {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: String,
    pub order: Option<i32>,
    #[validate(length(max = 100))]
    pub icon: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateHighlight {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
    #[validate(length(max = 100))]
    pub icon: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeamMember {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub bio: Option<String>,
    pub photo: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(url)]
    pub linkedin_url: Option<String>,
    #[validate(url)]
    pub twitter_url: Option<String>,
    #[validate(url)]
    pub facebook_url: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTeamMember {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub bio: Option<String>,
    #[serde(default, with = "double_option")]
    pub photo: Option<Option<String>>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(url)]
    pub linkedin_url: Option<String>,
    #[validate(url)]
    pub twitter_url: Option<String>,
    #[validate(url)]
    pub facebook_url: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for a who-we-are block.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWhoWeAre {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateWhoWeAre {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, with = "double_option")]
    pub image: Option<Option<String>>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOurStory {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub content: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,
    pub image: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateOurStory {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub content: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    #[serde(default, with = "double_option")]
    pub year: Option<Option<i32>>,
    #[serde(default, with = "double_option")]
    pub image: Option<Option<String>>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePartner {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    #[validate(url)]
    pub website_url: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePartner {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "double_option")]
    pub logo: Option<Option<String>>,
    #[validate(url)]
    pub website_url: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}
