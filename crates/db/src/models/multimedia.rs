//! X (Twitter) Spaces, podcast episodes and the photo gallery.

use pwatch_core::choices::{display_label, XSpaceStatus};
use pwatch_core::media::{MediaFields, MediaUrlBuilder};
use pwatch_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `x_spaces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct XSpace {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub host: String,
    pub scheduled_date: Timestamp,
    /// Minutes.
    pub duration: Option<i32>,
    pub x_space_url: String,
    pub recording_url: Option<String>,
    pub thumbnail: Option<String>,
    pub status: String,
    pub topics: String,
    pub speakers: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An X Space with its status label.
#[derive(Debug, Clone, Serialize)]
pub struct XSpaceView {
    #[serde(flatten)]
    pub space: XSpace,
    pub status_display: String,
}

impl From<XSpace> for XSpaceView {
    fn from(space: XSpace) -> Self {
        Self {
            status_display: display_label::<XSpaceStatus>(&space.status),
            space,
        }
    }
}

impl MediaFields for XSpaceView {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        media.rewrite(&mut self.space.thumbnail);
    }
}

/// A row from the `podcasts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Podcast {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub host: String,
    pub guest: String,
    pub youtube_url: String,
    pub thumbnail: Option<String>,
    pub duration: Option<i32>,
    pub published_date: Timestamp,
    pub episode_number: Option<i32>,
    pub category: String,
    pub tags: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaFields for Podcast {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        media.rewrite(&mut self.thumbnail);
    }
}

/// A row from the `gallery_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryImage {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub event_date: Option<Date>,
    pub photographer: String,
    pub tags: String,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaFields for GalleryImage {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        media.rewrite_required(&mut self.image);
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateXSpace {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub host: String,
    pub scheduled_date: Timestamp,
    #[validate(range(min = 0))]
    pub duration: Option<i32>,
    #[validate(url)]
    pub x_space_url: String,
    #[validate(url)]
    pub recording_url: Option<String>,
    pub thumbnail: Option<String>,
    pub status: Option<String>,
    #[validate(length(max = 500))]
    pub topics: Option<String>,
    pub speakers: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateXSpace {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub host: Option<String>,
    pub scheduled_date: Option<Timestamp>,
    #[validate(range(min = 0))]
    #[serde(default, with = "double_option")]
    pub duration: Option<Option<i32>>,
    #[validate(url)]
    pub x_space_url: Option<String>,
    #[validate(url)]
    #[serde(default, with = "double_option")]
    pub recording_url: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub thumbnail: Option<Option<String>>,
    pub status: Option<String>,
    #[validate(length(max = 500))]
    pub topics: Option<String>,
    pub speakers: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePodcast {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub host: String,
    #[validate(length(max = 200))]
    pub guest: Option<String>,
    #[validate(url)]
    pub youtube_url: String,
    pub thumbnail: Option<String>,
    #[validate(range(min = 0))]
    pub duration: Option<i32>,
    pub published_date: Timestamp,
    pub episode_number: Option<i32>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(length(max = 500))]
    pub tags: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePodcast {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub host: Option<String>,
    #[validate(length(max = 200))]
    pub guest: Option<String>,
    #[validate(url)]
    pub youtube_url: Option<String>,
    #[serde(default, with = "double_option")]
    pub thumbnail: Option<Option<String>>,
    #[validate(range(min = 0))]
    #[serde(default, with = "double_option")]
    pub duration: Option<Option<i32>>,
    pub published_date: Option<Timestamp>,
    #[serde(default, with = "double_option")]
    pub episode_number: Option<Option<i32>>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(length(max = 500))]
    pub tags: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGalleryImage {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub image: String,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    pub event_date: Option<Date>,
    #[validate(length(max = 200))]
    pub photographer: Option<String>,
    #[validate(length(max = 500))]
    pub tags: Option<String>,
    pub featured: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateGalleryImage {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub image: Option<String>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[serde(default, with = "double_option")]
    pub event_date: Option<Option<Date>>,
    #[validate(length(max = 200))]
    pub photographer: Option<String>,
    #[validate(length(max = 500))]
    pub tags: Option<String>,
    pub featured: Option<bool>,
}
