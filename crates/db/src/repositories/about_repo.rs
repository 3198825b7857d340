//! Repositories for the about-page tables.

use pwatch_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{fetch_page, ListQuery, ListSpec, Page};
use crate::models::about::{
    CreateHighlight, CreateOurStory, CreatePartner, CreateTeamMember, CreateWhoWeAre, Highlight,
    OurStory, Partner, TeamMember, UpdateHighlight, UpdateOurStory, UpdatePartner,
    UpdateTeamMember, UpdateWhoWeAre, WhoWeAre,
};
use crate::repositories::delete_by_id;

// ---------------------------------------------------------------------------
// Objectives / what sets us apart
// ---------------------------------------------------------------------------

const HIGHLIGHT_COLUMNS: &str =
    "id, title, description, \"order\", icon, is_active, created_at, updated_at";

/// The two about tables that share the [`Highlight`] shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightTable {
    Objectives,
    WhatSetsUsApart,
}

impl HighlightTable {
    pub fn table(self) -> &'static str {
        match self {
            Self::Objectives => "objectives",
            Self::WhatSetsUsApart => "what_sets_us_apart",
        }
    }

    pub fn entity(self) -> &'static str {
        match self {
            Self::Objectives => "Objective",
            Self::WhatSetsUsApart => "WhatSetsUsApart",
        }
    }

    fn list_spec(self) -> ListSpec {
        ListSpec {
            table: self.table(),
            columns: HIGHLIGHT_COLUMNS,
            search_columns: &["title", "description"],
            ordering_fields: &["order", "created_at"],
            default_ordering: &["order", "created_at"],
            page_size: 20,
        }
    }
}

/// Data access for objectives and differentiators.
pub struct HighlightRepo;

impl HighlightRepo {
    pub async fn list(
        pool: &PgPool,
        table: HighlightTable,
        query: &ListQuery,
    ) -> Result<Page<Highlight>, sqlx::Error> {
        fetch_page(pool, &table.list_spec(), query).await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        table: HighlightTable,
        id: DbId,
    ) -> Result<Option<Highlight>, sqlx::Error> {
        let query = format!(
            "SELECT {HIGHLIGHT_COLUMNS} FROM {} WHERE id = $1",
            table.table()
        );
        sqlx::query_as::<_, Highlight>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        table: HighlightTable,
        dto: &CreateHighlight,
    ) -> Result<Highlight, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (title, description, \"order\", icon, is_active) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {HIGHLIGHT_COLUMNS}",
            table.table()
        );
        sqlx::query_as::<_, Highlight>(&query)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(dto.order.unwrap_or(0))
            .bind(dto.icon.as_deref().unwrap_or(""))
            .bind(dto.is_active.unwrap_or(true))
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        table: HighlightTable,
        id: DbId,
        dto: &UpdateHighlight,
    ) -> Result<Option<Highlight>, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 \"order\" = COALESCE($4, \"order\"), \
                 icon = COALESCE($5, icon), \
                 is_active = COALESCE($6, is_active) \
             WHERE id = $1 \
             RETURNING {HIGHLIGHT_COLUMNS}",
            table.table()
        );
        sqlx::query_as::<_, Highlight>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(dto.order)
            .bind(&dto.icon)
            .bind(dto.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, table: HighlightTable, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, table.table(), id).await
    }
}

// ---------------------------------------------------------------------------
// Team members
// ---------------------------------------------------------------------------

const TEAM_COLUMNS: &str = "\
    id, name, title, bio, photo, email, phone, linkedin_url, twitter_url, \
    facebook_url, \"order\", is_active, created_at, updated_at";

pub struct TeamMemberRepo;

impl TeamMemberRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "team_members",
        columns: TEAM_COLUMNS,
        search_columns: &["name", "title"],
        ordering_fields: &["order", "name", "created_at"],
        default_ordering: &["order", "name"],
        page_size: 20,
    };

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<TeamMember>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!("SELECT {TEAM_COLUMNS} FROM team_members WHERE id = $1");
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, dto: &CreateTeamMember) -> Result<TeamMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO team_members \
                 (name, title, bio, photo, email, phone, linkedin_url, twitter_url, \
                  facebook_url, \"order\", is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {TEAM_COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(&dto.name)
            .bind(&dto.title)
            .bind(dto.bio.as_deref().unwrap_or(""))
            .bind(&dto.photo)
            .bind(dto.email.as_deref().unwrap_or(""))
            .bind(dto.phone.as_deref().unwrap_or(""))
            .bind(dto.linkedin_url.as_deref().unwrap_or(""))
            .bind(dto.twitter_url.as_deref().unwrap_or(""))
            .bind(dto.facebook_url.as_deref().unwrap_or(""))
            .bind(dto.order.unwrap_or(0))
            .bind(dto.is_active.unwrap_or(true))
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateTeamMember,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!(
            "UPDATE team_members SET \
                 name = COALESCE($2, name), \
                 title = COALESCE($3, title), \
                 bio = COALESCE($4, bio), \
                 photo = CASE WHEN $5 THEN $6 ELSE photo END, \
                 email = COALESCE($7, email), \
                 phone = COALESCE($8, phone), \
                 linkedin_url = COALESCE($9, linkedin_url), \
                 twitter_url = COALESCE($10, twitter_url), \
                 facebook_url = COALESCE($11, facebook_url), \
                 \"order\" = COALESCE($12, \"order\"), \
                 is_active = COALESCE($13, is_active) \
             WHERE id = $1 \
             RETURNING {TEAM_COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.title)
            .bind(&dto.bio)
            .bind(dto.photo.is_some())
            .bind(dto.photo.as_ref().and_then(|v| v.as_deref()))
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(&dto.linkedin_url)
            .bind(&dto.twitter_url)
            .bind(&dto.facebook_url)
            .bind(dto.order)
            .bind(dto.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, "team_members", id).await
    }
}

// ---------------------------------------------------------------------------
// Who we are
// ---------------------------------------------------------------------------

const WHO_COLUMNS: &str = "id, title, content, image, \"order\", is_active, created_at, updated_at";

pub struct WhoWeAreRepo;

impl WhoWeAreRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "who_we_are",
        columns: WHO_COLUMNS,
        search_columns: &["title", "content"],
        ordering_fields: &["order", "created_at"],
        default_ordering: &["order", "created_at"],
        page_size: 20,
    };

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<WhoWeAre>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WhoWeAre>, sqlx::Error> {
        let query = format!("SELECT {WHO_COLUMNS} FROM who_we_are WHERE id = $1");
        sqlx::query_as::<_, WhoWeAre>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, dto: &CreateWhoWeAre) -> Result<WhoWeAre, sqlx::Error> {
        let query = format!(
            "INSERT INTO who_we_are (title, content, image, \"order\", is_active) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {WHO_COLUMNS}"
        );
        sqlx::query_as::<_, WhoWeAre>(&query)
            .bind(&dto.title)
            .bind(&dto.content)
            .bind(&dto.image)
            .bind(dto.order.unwrap_or(0))
            .bind(dto.is_active.unwrap_or(true))
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateWhoWeAre,
    ) -> Result<Option<WhoWeAre>, sqlx::Error> {
        let query = format!(
            "UPDATE who_we_are SET \
                 title = COALESCE($2, title), \
                 content = COALESCE($3, content), \
                 image = CASE WHEN $4 THEN $5 ELSE image END, \
                 \"order\" = COALESCE($6, \"order\"), \
                 is_active = COALESCE($7, is_active) \
             WHERE id = $1 \
             RETURNING {WHO_COLUMNS}"
        );
        sqlx::query_as::<_, WhoWeAre>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.content)
            .bind(dto.image.is_some())
            .bind(dto.image.as_ref().and_then(|v| v.as_deref()))
            .bind(dto.order)
            .bind(dto.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, "who_we_are", id).await
    }
}

// ---------------------------------------------------------------------------
// Our story
// ---------------------------------------------------------------------------

const STORY_COLUMNS: &str =
    "id, title, content, year, image, \"order\", is_active, created_at, updated_at";

pub struct OurStoryRepo;

impl OurStoryRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "our_story",
        columns: STORY_COLUMNS,
        search_columns: &["title", "content"],
        ordering_fields: &["order", "year", "created_at"],
        default_ordering: &["order", "created_at"],
        page_size: 20,
    };

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<OurStory>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<OurStory>, sqlx::Error> {
        let query = format!("SELECT {STORY_COLUMNS} FROM our_story WHERE id = $1");
        sqlx::query_as::<_, OurStory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, dto: &CreateOurStory) -> Result<OurStory, sqlx::Error> {
        let query = format!(
            "INSERT INTO our_story (title, content, year, image, \"order\", is_active) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {STORY_COLUMNS}"
        );
        sqlx::query_as::<_, OurStory>(&query)
            .bind(&dto.title)
            .bind(&dto.content)
            .bind(dto.year)
            .bind(&dto.image)
            .bind(dto.order.unwrap_or(0))
            .bind(dto.is_active.unwrap_or(true))
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateOurStory,
    ) -> Result<Option<OurStory>, sqlx::Error> {
        let query = format!(
            "UPDATE our_story SET \
                 title = COALESCE($2, title), \
                 content = COALESCE($3, content), \
                 year = CASE WHEN $4 THEN $5 ELSE year END, \
                 image = CASE WHEN $6 THEN $7 ELSE image END, \
                 \"order\" = COALESCE($8, \"order\"), \
                 is_active = COALESCE($9, is_active) \
             WHERE id = $1 \
             RETURNING {STORY_COLUMNS}"
        );
        sqlx::query_as::<_, OurStory>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.content)
            .bind(dto.year.is_some())
            .bind(dto.year.flatten())
            .bind(dto.image.is_some())
            .bind(dto.image.as_ref().and_then(|v| v.as_deref()))
            .bind(dto.order)
            .bind(dto.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, "our_story", id).await
    }
}

// ---------------------------------------------------------------------------
// Partners
// ---------------------------------------------------------------------------

const PARTNER_COLUMNS: &str =
    "id, name, description, logo, website_url, \"order\", is_active, created_at, updated_at";

pub struct PartnerRepo;

impl PartnerRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "partners",
        columns: PARTNER_COLUMNS,
        search_columns: &["name", "description"],
        ordering_fields: &["order", "name", "created_at"],
        default_ordering: &["order", "name"],
        page_size: 20,
    };

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<Partner>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Partner>, sqlx::Error> {
        let query = format!("SELECT {PARTNER_COLUMNS} FROM partners WHERE id = $1");
        sqlx::query_as::<_, Partner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, dto: &CreatePartner) -> Result<Partner, sqlx::Error> {
        let query = format!(
            "INSERT INTO partners (name, description, logo, website_url, \"order\", is_active) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {PARTNER_COLUMNS}"
        );
        sqlx::query_as::<_, Partner>(&query)
            .bind(&dto.name)
            .bind(dto.description.as_deref().unwrap_or(""))
            .bind(&dto.logo)
            .bind(dto.website_url.as_deref().unwrap_or(""))
            .bind(dto.order.unwrap_or(0))
            .bind(dto.is_active.unwrap_or(true))
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdatePartner,
    ) -> Result<Option<Partner>, sqlx::Error> {
        let query = format!(
            "UPDATE partners SET \
                 name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 logo = CASE WHEN $4 THEN $5 ELSE logo END, \
                 website_url = COALESCE($6, website_url), \
                 \"order\" = COALESCE($7, \"order\"), \
                 is_active = COALESCE($8, is_active) \
             WHERE id = $1 \
             RETURNING {PARTNER_COLUMNS}"
        );
        sqlx::query_as::<_, Partner>(&query)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.logo.is_some())
            .bind(dto.logo.as_ref().and_then(|v| v.as_deref()))
            .bind(&dto.website_url)
            .bind(dto.order)
            .bind(dto.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, "partners", id).await
    }
}
