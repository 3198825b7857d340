//! Blog posts and news articles.
//!
//! The `blogs` and `news` tables have identical columns and only differ in
//! their category sets, so both are modelled by [`Article`] and told apart
//! by [`ArticleKind`].

use pwatch_core::choices::{
    display_label, validate_choice, BlogCategory, Choice, NewsCategory, PublishStatus,
};
use pwatch_core::error::CoreError;
use pwatch_core::media::{MediaFields, MediaUrlBuilder};
use pwatch_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use sqlx::FromRow;
use validator::Validate;

/// Which article table a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArticleKind {
    Blog,
    News,
}

impl ArticleKind {
    pub fn table(self) -> &'static str {
        match self {
            Self::Blog => "blogs",
            Self::News => "news",
        }
    }

    /// Entity name used in not-found errors and log lines.
    pub fn entity(self) -> &'static str {
        match self {
            Self::Blog => "Blog",
            Self::News => "News",
        }
    }

    pub fn default_category(self) -> &'static str {
        match self {
            Self::Blog => "governance",
            Self::News => "news_updates",
        }
    }

    pub fn category_label(self, raw: &str) -> String {
        match self {
            Self::Blog => display_label::<BlogCategory>(raw),
            Self::News => display_label::<NewsCategory>(raw),
        }
    }

    pub fn validate_category(self, raw: &str) -> Result<(), CoreError> {
        match self {
            Self::Blog => validate_choice::<BlogCategory>("category", raw),
            Self::News => validate_choice::<NewsCategory>("category", raw),
        }
    }
}

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `blogs` or `news` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub category: String,
    pub excerpt: String,
    pub content: String,
    pub image: Option<String>,
    pub status: String,
    pub published_date: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Article {
    pub fn is_published(&self) -> bool {
        self.status == PublishStatus::Published.value()
    }
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// List-card shape.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleSummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub category: String,
    pub category_display: String,
    pub excerpt: String,
    pub image: Option<String>,
    pub published_date: Date,
}

impl ArticleSummary {
    pub fn from_article(kind: ArticleKind, a: Article) -> Self {
        Self {
            category_display: kind.category_label(&a.category),
            id: a.id,
            title: a.title,
            slug: a.slug,
            author: a.author,
            category: a.category,
            excerpt: a.excerpt,
            image: a.image,
            published_date: a.published_date,
        }
    }
}

impl MediaFields for ArticleSummary {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        media.rewrite(&mut self.image);
    }
}

/// Full article with its display label.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: Article,
    pub category_display: String,
}

impl ArticleDetail {
    pub fn from_article(kind: ArticleKind, article: Article) -> Self {
        Self {
            category_display: kind.category_label(&article.category),
            article,
        }
    }
}

impl MediaFields for ArticleDetail {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        media.rewrite(&mut self.article.image);
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating an article. An empty or missing `slug` is derived from
/// the title.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateArticle {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[validate(length(max = 550))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub author: String,
    pub category: Option<String>,
    #[validate(length(max = 500))]
    pub excerpt: Option<String>,
    pub content: String,
    pub image: Option<String>,
    pub status: Option<String>,
    pub published_date: Option<Date>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateArticle {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 550))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub author: Option<String>,
    pub category: Option<String>,
    #[validate(length(max = 500))]
    pub excerpt: Option<String>,
    pub content: Option<String>,
    #[serde(default, with = "double_option")]
    pub image: Option<Option<String>>,
    pub status: Option<String>,
    pub published_date: Option<Date>,
}
