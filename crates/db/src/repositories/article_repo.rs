//! Repository for the `blogs` and `news` tables.
//!
//! Both tables share a shape, so every method takes an [`ArticleKind`]
//! selecting the table.

use pwatch_core::slug::{slug_candidate, slugify};
use sqlx::PgPool;

use crate::listing::{fetch_page, ListQuery, ListSpec, Page};
use crate::models::article::{Article, ArticleKind, CreateArticle, UpdateArticle};

const ARTICLE_COLUMNS: &str = "\
    id, title, slug, author, category, excerpt, content, image, status, \
    published_date, created_at, updated_at";

/// Auto-derived slugs try `base`, `base-2`, ... up to this many times
/// before the final insert is allowed to fail with a conflict.
const MAX_SLUG_ATTEMPTS: u32 = 50;

fn list_spec(kind: ArticleKind) -> ListSpec {
    ListSpec {
        table: kind.table(),
        columns: ARTICLE_COLUMNS,
        search_columns: &["title", "author", "content", "excerpt"],
        ordering_fields: &["published_date", "created_at", "title"],
        default_ordering: &["-published_date", "-created_at"],
        page_size: 12,
    }
}

/// Provides data access for blog posts and news articles.
pub struct ArticleRepo;

impl ArticleRepo {
    pub async fn list(
        pool: &PgPool,
        kind: ArticleKind,
        query: &ListQuery,
    ) -> Result<Page<Article>, sqlx::Error> {
        fetch_page(pool, &list_spec(kind), query).await
    }

    /// The most recent published articles, newest first.
    pub async fn latest_published(
        pool: &PgPool,
        kind: ArticleKind,
        limit: i64,
    ) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {ARTICLE_COLUMNS} FROM {} \
             WHERE status = 'published' \
             ORDER BY published_date DESC, created_at DESC, id DESC \
             LIMIT $1",
            kind.table()
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        kind: ArticleKind,
        slug: &str,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {ARTICLE_COLUMNS} FROM {} WHERE slug = $1",
            kind.table()
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Insert an article.
    ///
    /// An explicit slug is inserted as-is and a duplicate surfaces as a
    /// `uq_*_slug` violation. A missing or blank slug is derived from the
    /// title and de-duplicated with a numeric suffix.
    pub async fn create(
        pool: &PgPool,
        kind: ArticleKind,
        dto: &CreateArticle,
    ) -> Result<Article, sqlx::Error> {
        if let Some(slug) = dto.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            return Self::insert(pool, kind, dto, slug, false)
                .await?
                .ok_or(sqlx::Error::RowNotFound);
        }

        let base = slugify(&dto.title);
        for attempt in 1..MAX_SLUG_ATTEMPTS {
            let candidate = slug_candidate(&base, attempt);
            if let Some(article) = Self::insert(pool, kind, dto, &candidate, true).await? {
                return Ok(article);
            }
            tracing::debug!(slug = %candidate, "Slug taken, trying next suffix");
        }

        let last = slug_candidate(&base, MAX_SLUG_ATTEMPTS);
        Self::insert(pool, kind, dto, &last, false)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Run the INSERT. With `skip_conflict`, a slug collision yields
    /// `Ok(None)` instead of an error.
    async fn insert(
        pool: &PgPool,
        kind: ArticleKind,
        dto: &CreateArticle,
        slug: &str,
        skip_conflict: bool,
    ) -> Result<Option<Article>, sqlx::Error> {
        let table = kind.table();
        let on_conflict = if skip_conflict {
            format!("ON CONFLICT ON CONSTRAINT uq_{table}_slug DO NOTHING ")
        } else {
            String::new()
        };
        let query = format!(
            "INSERT INTO {table} \
                 (title, slug, author, category, excerpt, content, image, status, published_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, CURRENT_DATE)) \
             {on_conflict}\
             RETURNING {ARTICLE_COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&dto.title)
            .bind(slug)
            .bind(&dto.author)
            .bind(dto.category.as_deref().unwrap_or(kind.default_category()))
            .bind(dto.excerpt.as_deref().unwrap_or(""))
            .bind(&dto.content)
            .bind(&dto.image)
            .bind(dto.status.as_deref().unwrap_or("draft"))
            .bind(dto.published_date)
            .fetch_optional(pool)
            .await
    }

    /// Partially update the article identified by `slug`.
    pub async fn update(
        pool: &PgPool,
        kind: ArticleKind,
        slug: &str,
        dto: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET \
                 title = COALESCE($2, title), \
                 slug = COALESCE($3, slug), \
                 author = COALESCE($4, author), \
                 category = COALESCE($5, category), \
                 excerpt = COALESCE($6, excerpt), \
                 content = COALESCE($7, content), \
                 image = CASE WHEN $8 THEN $9 ELSE image END, \
                 status = COALESCE($10, status), \
                 published_date = COALESCE($11, published_date) \
             WHERE slug = $1 \
             RETURNING {ARTICLE_COLUMNS}",
            kind.table()
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(slug)
            .bind(&dto.title)
            .bind(&dto.slug)
            .bind(&dto.author)
            .bind(&dto.category)
            .bind(&dto.excerpt)
            .bind(&dto.content)
            .bind(dto.image.is_some())
            .bind(dto.image.as_ref().and_then(|v| v.as_deref()))
            .bind(&dto.status)
            .bind(dto.published_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete by slug. Returns `true` if a row was deleted.
    pub async fn delete_by_slug(
        pool: &PgPool,
        kind: ArticleKind,
        slug: &str,
    ) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE slug = $1", kind.table());
        let result = sqlx::query(&query).bind(slug).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
