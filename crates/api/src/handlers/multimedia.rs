//! Handlers for X Spaces, podcasts and the photo gallery.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pwatch_core::choices::{validate_optional_choice, XSpaceStatus};
use pwatch_core::error::CoreError;
use pwatch_core::types::DbId;
use pwatch_db::models::multimedia::{
    CreateGalleryImage, CreatePodcast, CreateXSpace, UpdateGalleryImage, UpdatePodcast,
    UpdateXSpace, XSpaceView,
};
use pwatch_db::repositories::{GalleryRepo, PodcastRepo, XSpaceRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct XSpaceFilters {
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PodcastFilters {
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GalleryFilters {
    pub category: Option<String>,
    pub featured: Option<bool>,
}

// ---------------------------------------------------------------------------
// X Spaces
// ---------------------------------------------------------------------------

/// GET /api/v1/multimedia/x-spaces
pub async fn list_x_spaces(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filters): Query<XSpaceFilters>,
) -> AppResult<impl IntoResponse> {
    let query = params.into_query().filter_opt("status", filters.status);
    let page = XSpaceRepo::list(&state.pool, &query)
        .await?
        .map(XSpaceView::from);
    Ok(Json(PaginatedResponse::with_media(page, &state.media)))
}

/// GET /api/v1/multimedia/x-spaces/{id}
pub async fn get_x_space(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let space = XSpaceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("XSpace", id)))?;
    Ok(Json(DataResponse::with_media(
        XSpaceView::from(space),
        &state.media,
    )))
}

/// POST /api/v1/multimedia/x-spaces
pub async fn create_x_space(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateXSpace>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_optional_choice::<XSpaceStatus>("status", input.status.as_deref())?;

    let space = XSpaceRepo::create(&state.pool, &input).await?;
    tracing::info!(id = space.id, user_id = admin.user_id, "X Space created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_media(
            XSpaceView::from(space),
            &state.media,
        )),
    ))
}

/// PUT /api/v1/multimedia/x-spaces/{id}
pub async fn update_x_space(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateXSpace>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_optional_choice::<XSpaceStatus>("status", input.status.as_deref())?;

    let space = XSpaceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("XSpace", id)))?;
    tracing::info!(id, status = %space.status, "X Space updated");

    Ok(Json(DataResponse::with_media(
        XSpaceView::from(space),
        &state.media,
    )))
}

/// DELETE /api/v1/multimedia/x-spaces/{id}
pub async fn delete_x_space(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !XSpaceRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("XSpace", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Podcasts
// ---------------------------------------------------------------------------

/// GET /api/v1/multimedia/podcasts
pub async fn list_podcasts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filters): Query<PodcastFilters>,
) -> AppResult<impl IntoResponse> {
    let query = params.into_query().filter_opt("category", filters.category);
    let page = PodcastRepo::list(&state.pool, &query).await?;
    Ok(Json(PaginatedResponse::with_media(page, &state.media)))
}

/// GET /api/v1/multimedia/podcasts/{id}
pub async fn get_podcast(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let podcast = PodcastRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Podcast", id)))?;
    Ok(Json(DataResponse::with_media(podcast, &state.media)))
}

/// POST /api/v1/multimedia/podcasts
pub async fn create_podcast(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreatePodcast>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let podcast = PodcastRepo::create(&state.pool, &input).await?;
    tracing::info!(id = podcast.id, user_id = admin.user_id, "Podcast created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_media(podcast, &state.media)),
    ))
}

/// PUT /api/v1/multimedia/podcasts/{id}
pub async fn update_podcast(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePodcast>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let podcast = PodcastRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Podcast", id)))?;
    Ok(Json(DataResponse::with_media(podcast, &state.media)))
}

/// DELETE /api/v1/multimedia/podcasts/{id}
pub async fn delete_podcast(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PodcastRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Podcast", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// GET /api/v1/multimedia/gallery
pub async fn list_gallery(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filters): Query<GalleryFilters>,
) -> AppResult<impl IntoResponse> {
    let query = params
        .into_query()
        .filter_opt("category", filters.category)
        .filter_opt("featured", filters.featured);
    let page = GalleryRepo::list(&state.pool, &query).await?;
    Ok(Json(PaginatedResponse::with_media(page, &state.media)))
}

/// GET /api/v1/multimedia/gallery/{id}
pub async fn get_gallery_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let image = GalleryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("GalleryImage", id)))?;
    Ok(Json(DataResponse::with_media(image, &state.media)))
}

/// POST /api/v1/multimedia/gallery
pub async fn create_gallery_image(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateGalleryImage>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let image = GalleryRepo::create(&state.pool, &input).await?;
    tracing::info!(id = image.id, user_id = admin.user_id, "Gallery image created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_media(image, &state.media)),
    ))
}

/// PUT /api/v1/multimedia/gallery/{id}
pub async fn update_gallery_image(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGalleryImage>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let image = GalleryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("GalleryImage", id)))?;
    Ok(Json(DataResponse::with_media(image, &state.media)))
}

/// DELETE /api/v1/multimedia/gallery/{id}
pub async fn delete_gallery_image(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !GalleryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("GalleryImage", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
