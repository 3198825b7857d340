//! Repositories for `x_spaces`, `podcasts` and `gallery_images`.

use pwatch_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{fetch_page, ListQuery, ListSpec, Page};
use crate::models::multimedia::{
    CreateGalleryImage, CreatePodcast, CreateXSpace, GalleryImage, Podcast, UpdateGalleryImage,
    UpdatePodcast, UpdateXSpace, XSpace,
};
use crate::repositories::delete_by_id;

const X_SPACE_COLUMNS: &str = "\
    id, title, description, host, scheduled_date, duration, x_space_url, \
    recording_url, thumbnail, status, topics, speakers, created_at, updated_at";

const PODCAST_COLUMNS: &str = "\
    id, title, description, host, guest, youtube_url, thumbnail, duration, \
    published_date, episode_number, category, tags, created_at, updated_at";

const GALLERY_COLUMNS: &str = "\
    id, title, description, image, category, event_date, photographer, tags, \
    featured, created_at, updated_at";

// ---------------------------------------------------------------------------
// X Spaces
// ---------------------------------------------------------------------------

pub struct XSpaceRepo;

impl XSpaceRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "x_spaces",
        columns: X_SPACE_COLUMNS,
        search_columns: &["title", "description", "host", "topics", "speakers"],
        ordering_fields: &["scheduled_date", "created_at", "title"],
        default_ordering: &["-scheduled_date", "-created_at"],
        page_size: 12,
    };

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<XSpace>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<XSpace>, sqlx::Error> {
        let query = format!("SELECT {X_SPACE_COLUMNS} FROM x_spaces WHERE id = $1");
        sqlx::query_as::<_, XSpace>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, dto: &CreateXSpace) -> Result<XSpace, sqlx::Error> {
        let query = format!(
            "INSERT INTO x_spaces \
                 (title, description, host, scheduled_date, duration, x_space_url, \
                  recording_url, thumbnail, status, topics, speakers) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {X_SPACE_COLUMNS}"
        );
        sqlx::query_as::<_, XSpace>(&query)
            .bind(&dto.title)
            .bind(dto.description.as_deref().unwrap_or(""))
            .bind(&dto.host)
            .bind(dto.scheduled_date)
            .bind(dto.duration)
            .bind(&dto.x_space_url)
            .bind(&dto.recording_url)
            .bind(&dto.thumbnail)
            .bind(dto.status.as_deref().unwrap_or("upcoming"))
            .bind(dto.topics.as_deref().unwrap_or(""))
            .bind(dto.speakers.as_deref().unwrap_or(""))
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateXSpace,
    ) -> Result<Option<XSpace>, sqlx::Error> {
        let query = format!(
            "UPDATE x_spaces SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 host = COALESCE($4, host), \
                 scheduled_date = COALESCE($5, scheduled_date), \
                 duration = CASE WHEN $6 THEN $7 ELSE duration END, \
                 x_space_url = COALESCE($8, x_space_url), \
                 recording_url = CASE WHEN $9 THEN $10 ELSE recording_url END, \
                 thumbnail = CASE WHEN $11 THEN $12 ELSE thumbnail END, \
                 status = COALESCE($13, status), \
                 topics = COALESCE($14, topics), \
                 speakers = COALESCE($15, speakers) \
             WHERE id = $1 \
             RETURNING {X_SPACE_COLUMNS}"
        );
        sqlx::query_as::<_, XSpace>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(&dto.host)
            .bind(dto.scheduled_date)
            .bind(dto.duration.is_some())
            .bind(dto.duration.flatten())
            .bind(&dto.x_space_url)
            .bind(dto.recording_url.is_some())
            .bind(dto.recording_url.as_ref().and_then(|v| v.as_deref()))
            .bind(dto.thumbnail.is_some())
            .bind(dto.thumbnail.as_ref().and_then(|v| v.as_deref()))
            .bind(&dto.status)
            .bind(&dto.topics)
            .bind(&dto.speakers)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, "x_spaces", id).await
    }
}

// ---------------------------------------------------------------------------
// Podcasts
// ---------------------------------------------------------------------------

pub struct PodcastRepo;

impl PodcastRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "podcasts",
        columns: PODCAST_COLUMNS,
        search_columns: &["title", "description", "host", "guest", "tags"],
        ordering_fields: &["published_date", "created_at", "title"],
        default_ordering: &["-published_date", "-created_at"],
        page_size: 12,
    };

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<Podcast>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Podcast>, sqlx::Error> {
        let query = format!("SELECT {PODCAST_COLUMNS} FROM podcasts WHERE id = $1");
        sqlx::query_as::<_, Podcast>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, dto: &CreatePodcast) -> Result<Podcast, sqlx::Error> {
        let query = format!(
            "INSERT INTO podcasts \
                 (title, description, host, guest, youtube_url, thumbnail, duration, \
                  published_date, episode_number, category, tags) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {PODCAST_COLUMNS}"
        );
        sqlx::query_as::<_, Podcast>(&query)
            .bind(&dto.title)
            .bind(dto.description.as_deref().unwrap_or(""))
            .bind(&dto.host)
            .bind(dto.guest.as_deref().unwrap_or(""))
            .bind(&dto.youtube_url)
            .bind(&dto.thumbnail)
            .bind(dto.duration)
            .bind(dto.published_date)
            .bind(dto.episode_number)
            .bind(dto.category.as_deref().unwrap_or(""))
            .bind(dto.tags.as_deref().unwrap_or(""))
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdatePodcast,
    ) -> Result<Option<Podcast>, sqlx::Error> {
        let query = format!(
            "UPDATE podcasts SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 host = COALESCE($4, host), \
                 guest = COALESCE($5, guest), \
                 youtube_url = COALESCE($6, youtube_url), \
                 thumbnail = CASE WHEN $7 THEN $8 ELSE thumbnail END, \
                 duration = CASE WHEN $9 THEN $10 ELSE duration END, \
                 published_date = COALESCE($11, published_date), \
                 episode_number = CASE WHEN $12 THEN $13 ELSE episode_number END, \
                 category = COALESCE($14, category), \
                 tags = COALESCE($15, tags) \
             WHERE id = $1 \
             RETURNING {PODCAST_COLUMNS}"
        );
        sqlx::query_as::<_, Podcast>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(&dto.host)
            .bind(&dto.guest)
            .bind(&dto.youtube_url)
            .bind(dto.thumbnail.is_some())
            .bind(dto.thumbnail.as_ref().and_then(|v| v.as_deref()))
            .bind(dto.duration.is_some())
            .bind(dto.duration.flatten())
            .bind(dto.published_date)
            .bind(dto.episode_number.is_some())
            .bind(dto.episode_number.flatten())
            .bind(&dto.category)
            .bind(&dto.tags)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, "podcasts", id).await
    }
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

pub struct GalleryRepo;

impl GalleryRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "gallery_images",
        columns: GALLERY_COLUMNS,
        search_columns: &["title", "description", "photographer", "tags"],
        ordering_fields: &["event_date", "created_at", "title"],
        default_ordering: &["-featured", "-event_date", "-created_at"],
        page_size: 20,
    };

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<GalleryImage>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GalleryImage>, sqlx::Error> {
        let query = format!("SELECT {GALLERY_COLUMNS} FROM gallery_images WHERE id = $1");
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, dto: &CreateGalleryImage) -> Result<GalleryImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO gallery_images \
                 (title, description, image, category, event_date, photographer, tags, featured) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {GALLERY_COLUMNS}"
        );
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(&dto.title)
            .bind(dto.description.as_deref().unwrap_or(""))
            .bind(&dto.image)
            .bind(dto.category.as_deref().unwrap_or(""))
            .bind(dto.event_date)
            .bind(dto.photographer.as_deref().unwrap_or(""))
            .bind(dto.tags.as_deref().unwrap_or(""))
            .bind(dto.featured.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateGalleryImage,
    ) -> Result<Option<GalleryImage>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery_images SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 image = COALESCE($4, image), \
                 category = COALESCE($5, category), \
                 event_date = CASE WHEN $6 THEN $7 ELSE event_date END, \
                 photographer = COALESCE($8, photographer), \
                 tags = COALESCE($9, tags), \
                 featured = COALESCE($10, featured) \
             WHERE id = $1 \
             RETURNING {GALLERY_COLUMNS}"
        );
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(&dto.image)
            .bind(&dto.category)
            .bind(dto.event_date.is_some())
            .bind(dto.event_date.flatten())
            .bind(&dto.photographer)
            .bind(&dto.tags)
            .bind(dto.featured)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, "gallery_images", id).await
    }
}
