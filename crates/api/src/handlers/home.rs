//! Handlers for home-page hero images and headline ticker entries.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pwatch_core::error::CoreError;
use pwatch_core::types::DbId;
use pwatch_db::models::home::{CreateHeadline, CreateHeroImage, UpdateHeadline, UpdateHeroImage};
use pwatch_db::repositories::{HeadlineRepo, HeroImageRepo};
use validator::Validate;

use super::{scope_active, visible_to};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{OptionalAdmin, RequireAdmin};
use crate::query::{ActiveFilter, ListParams};
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Hero images
// ---------------------------------------------------------------------------

/// GET /api/v1/home/hero-images
pub async fn list_hero_images(
    staff: OptionalAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<ActiveFilter>,
) -> AppResult<impl IntoResponse> {
    let query = scope_active(params.into_query(), &staff, filter.is_active);
    let page = HeroImageRepo::list(&state.pool, &query).await?;
    Ok(Json(PaginatedResponse::with_media(page, &state.media)))
}

/// GET /api/v1/home/hero-images/{id}
pub async fn get_hero_image(
    staff: OptionalAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let hero = HeroImageRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|row| visible_to(row.is_active, &staff))
        .ok_or_else(|| AppError::Core(CoreError::not_found("HeroImage", id)))?;
    Ok(Json(DataResponse::with_media(hero, &state.media)))
}

/// POST /api/v1/home/hero-images
pub async fn create_hero_image(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateHeroImage>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let hero = HeroImageRepo::create(&state.pool, &input).await?;
    tracing::info!(id = hero.id, user_id = admin.user_id, "Hero image created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_media(hero, &state.media)),
    ))
}

/// PUT /api/v1/home/hero-images/{id}
pub async fn update_hero_image(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateHeroImage>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let hero = HeroImageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("HeroImage", id)))?;
    Ok(Json(DataResponse::with_media(hero, &state.media)))
}

/// DELETE /api/v1/home/hero-images/{id}
pub async fn delete_hero_image(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !HeroImageRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("HeroImage", id)));
    }
    tracing::info!(id, "Hero image deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Headlines
// ---------------------------------------------------------------------------

/// GET /api/v1/home/headlines
pub async fn list_headlines(
    staff: OptionalAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<ActiveFilter>,
) -> AppResult<impl IntoResponse> {
    let query = scope_active(params.into_query(), &staff, filter.is_active);
    let page = HeadlineRepo::list(&state.pool, &query).await?;
    Ok(Json(PaginatedResponse::from(page)))
}

/// GET /api/v1/home/headlines/{id}
pub async fn get_headline(
    staff: OptionalAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let headline = HeadlineRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|row| visible_to(row.is_active, &staff))
        .ok_or_else(|| AppError::Core(CoreError::not_found("Headline", id)))?;
    Ok(Json(DataResponse { data: headline }))
}

/// POST /api/v1/home/headlines
pub async fn create_headline(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateHeadline>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let headline = HeadlineRepo::create(&state.pool, &input).await?;
    tracing::info!(id = headline.id, "Headline created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: headline })))
}

/// PUT /api/v1/home/headlines/{id}
pub async fn update_headline(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateHeadline>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let headline = HeadlineRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Headline", id)))?;
    Ok(Json(DataResponse { data: headline }))
}

/// DELETE /api/v1/home/headlines/{id}
pub async fn delete_headline(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !HeadlineRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Headline", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
