//! Handlers for blog posts and news articles.
//!
//! Both resources share these handlers; the router selects the table with an
//! [`Extension<ArticleKind>`] layer. Lookup is by slug.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use pwatch_core::choices::{validate_optional_choice, Choice, PublishStatus};
use pwatch_core::error::CoreError;
use pwatch_core::media::MediaFields;
use pwatch_db::models::article::{
    ArticleDetail, ArticleKind, ArticleSummary, CreateArticle, UpdateArticle,
};
use pwatch_db::repositories::ArticleRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{OptionalAdmin, RequireAdmin};
use crate::query::ListParams;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

/// Number of cards on the home page.
const HOME_SUMMARY_LIMIT: i64 = 3;

/// Exact-match filters for article listings.
#[derive(Debug, Default, Deserialize)]
pub struct ArticleFilters {
    pub category: Option<String>,
    pub status: Option<String>,
    pub author: Option<String>,
}

/// GET /api/v1/blog, /api/v1/news
///
/// Anonymous callers only ever see published articles.
pub async fn list_articles(
    staff: OptionalAdmin,
    Extension(kind): Extension<ArticleKind>,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filters): Query<ArticleFilters>,
) -> AppResult<impl IntoResponse> {
    let status = if staff.is_staff() {
        filters.status
    } else {
        Some(PublishStatus::Published.value().to_string())
    };

    let query = params
        .into_query()
        .filter_opt("category", filters.category)
        .filter_opt("status", status)
        .filter_opt("author", filters.author);

    let page = ArticleRepo::list(&state.pool, kind, &query)
        .await?
        .map(|a| ArticleSummary::from_article(kind, a));

    Ok(Json(PaginatedResponse::with_media(page, &state.media)))
}

/// GET /api/v1/blog/home-summary
///
/// The latest published articles in card shape, served from a short-lived
/// cache that every write for the same kind invalidates.
pub async fn home_summary(
    Extension(kind): Extension<ArticleKind>,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    if let Some(cached) = state.summaries.get(&kind).await {
        tracing::debug!(kind = kind.table(), "Home summary cache hit");
        return Ok(Json(DataResponse {
            data: cached.as_ref().clone(),
        }));
    }

    let mut cards: Vec<ArticleSummary> =
        ArticleRepo::latest_published(&state.pool, kind, HOME_SUMMARY_LIMIT)
            .await?
            .into_iter()
            .map(|a| ArticleSummary::from_article(kind, a))
            .collect();
    cards.absolutize(&state.media);

    state.summaries.insert(kind, Arc::new(cards.clone())).await;

    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/v1/blog/{slug}
pub async fn get_article(
    Extension(kind): Extension<ArticleKind>,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let article = ArticleRepo::find_by_slug(&state.pool, kind, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(kind.entity(), &slug)))?;

    Ok(Json(DataResponse::with_media(
        ArticleDetail::from_article(kind, article),
        &state.media,
    )))
}

/// POST /api/v1/blog
pub async fn create_article(
    RequireAdmin(admin): RequireAdmin,
    Extension(kind): Extension<ArticleKind>,
    State(state): State<AppState>,
    Json(input): Json<CreateArticle>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(category) = input.category.as_deref() {
        kind.validate_category(category)?;
    }
    validate_optional_choice::<PublishStatus>("status", input.status.as_deref())?;

    let article = ArticleRepo::create(&state.pool, kind, &input).await?;
    state.summaries.invalidate(&kind).await;

    tracing::info!(
        id = article.id,
        slug = %article.slug,
        kind = kind.table(),
        user_id = admin.user_id,
        "Article created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_media(
            ArticleDetail::from_article(kind, article),
            &state.media,
        )),
    ))
}

/// PUT /api/v1/blog/{slug}
pub async fn update_article(
    RequireAdmin(admin): RequireAdmin,
    Extension(kind): Extension<ArticleKind>,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<UpdateArticle>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(category) = input.category.as_deref() {
        kind.validate_category(category)?;
    }
    validate_optional_choice::<PublishStatus>("status", input.status.as_deref())?;

    let article = ArticleRepo::update(&state.pool, kind, &slug, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(kind.entity(), &slug)))?;
    state.summaries.invalidate(&kind).await;

    tracing::info!(
        id = article.id,
        kind = kind.table(),
        user_id = admin.user_id,
        "Article updated",
    );

    Ok(Json(DataResponse::with_media(
        ArticleDetail::from_article(kind, article),
        &state.media,
    )))
}

/// DELETE /api/v1/blog/{slug}
pub async fn delete_article(
    RequireAdmin(admin): RequireAdmin,
    Extension(kind): Extension<ArticleKind>,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    if !ArticleRepo::delete_by_slug(&state.pool, kind, &slug).await? {
        return Err(AppError::Core(CoreError::not_found(kind.entity(), &slug)));
    }
    state.summaries.invalidate(&kind).await;

    tracing::info!(slug = %slug, kind = kind.table(), user_id = admin.user_id, "Article deleted");

    Ok(StatusCode::NO_CONTENT)
}
