//! Repositories for `hero_images` and `headlines`.

use pwatch_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{fetch_page, ListQuery, ListSpec, Page};
use crate::models::home::{
    CreateHeadline, CreateHeroImage, Headline, HeroImage, UpdateHeadline, UpdateHeroImage,
};
use crate::repositories::delete_by_id;

const HERO_COLUMNS: &str =
    "id, title, image, \"order\", is_active, alt_text, created_at, updated_at";

const HEADLINE_COLUMNS: &str = "id, text, is_bold, \"order\", is_active, created_at, updated_at";

pub struct HeroImageRepo;

impl HeroImageRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "hero_images",
        columns: HERO_COLUMNS,
        search_columns: &["title", "alt_text"],
        ordering_fields: &["order", "created_at"],
        default_ordering: &["order", "created_at"],
        page_size: 20,
    };

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<HeroImage>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<HeroImage>, sqlx::Error> {
        let query = format!("SELECT {HERO_COLUMNS} FROM hero_images WHERE id = $1");
        sqlx::query_as::<_, HeroImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, dto: &CreateHeroImage) -> Result<HeroImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO hero_images (title, image, \"order\", is_active, alt_text) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {HERO_COLUMNS}"
        );
        sqlx::query_as::<_, HeroImage>(&query)
            .bind(dto.title.as_deref().unwrap_or(""))
            .bind(&dto.image)
            .bind(dto.order.unwrap_or(0))
            .bind(dto.is_active.unwrap_or(true))
            .bind(dto.alt_text.as_deref().unwrap_or(""))
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateHeroImage,
    ) -> Result<Option<HeroImage>, sqlx::Error> {
        let query = format!(
            "UPDATE hero_images SET \
                 title = COALESCE($2, title), \
                 image = COALESCE($3, image), \
                 \"order\" = COALESCE($4, \"order\"), \
                 is_active = COALESCE($5, is_active), \
                 alt_text = COALESCE($6, alt_text) \
             WHERE id = $1 \
             RETURNING {HERO_COLUMNS}"
        );
        sqlx::query_as::<_, HeroImage>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.image)
            .bind(dto.order)
            .bind(dto.is_active)
            .bind(&dto.alt_text)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, "hero_images", id).await
    }
}

pub struct HeadlineRepo;

impl HeadlineRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "headlines",
        columns: HEADLINE_COLUMNS,
        search_columns: &["text"],
        ordering_fields: &["order", "created_at"],
        default_ordering: &["order", "created_at"],
        page_size: 20,
    };

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<Headline>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Headline>, sqlx::Error> {
        let query = format!("SELECT {HEADLINE_COLUMNS} FROM headlines WHERE id = $1");
        sqlx::query_as::<_, Headline>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, dto: &CreateHeadline) -> Result<Headline, sqlx::Error> {
        let query = format!(
            "INSERT INTO headlines (text, is_bold, \"order\", is_active) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {HEADLINE_COLUMNS}"
        );
        sqlx::query_as::<_, Headline>(&query)
            .bind(&dto.text)
            .bind(dto.is_bold.unwrap_or(false))
            .bind(dto.order.unwrap_or(0))
            .bind(dto.is_active.unwrap_or(true))
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateHeadline,
    ) -> Result<Option<Headline>, sqlx::Error> {
        let query = format!(
            "UPDATE headlines SET \
                 text = COALESCE($2, text), \
                 is_bold = COALESCE($3, is_bold), \
                 \"order\" = COALESCE($4, \"order\"), \
                 is_active = COALESCE($5, is_active) \
             WHERE id = $1 \
             RETURNING {HEADLINE_COLUMNS}"
        );
        sqlx::query_as::<_, Headline>(&query)
            .bind(id)
            .bind(&dto.text)
            .bind(dto.is_bold)
            .bind(dto.order)
            .bind(dto.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, "headlines", id).await
    }
}
