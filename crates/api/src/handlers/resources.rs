//! Handlers for downloadable resource documents.
//!
//! Explainers, reports, partner publications and statements share one table;
//! the router pins each path to its [`ResourceKind`] with an extension layer
//! and every query is scoped by it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use pwatch_core::choices::{Choice, ResourceKind};
use pwatch_core::error::CoreError;
use pwatch_core::types::DbId;
use pwatch_db::models::resource::{CreateResourceDocument, UpdateResourceDocument};
use pwatch_db::repositories::ResourceRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("ResourceDocument", id))
}

/// GET /api/v1/resources/{kind}
pub async fn list_documents(
    Extension(kind): Extension<ResourceKind>,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let page = ResourceRepo::list(&state.pool, kind, params.into_query()).await?;
    Ok(Json(PaginatedResponse::with_media(page, &state.media)))
}

/// GET /api/v1/resources/{kind}/{id}
pub async fn get_document(
    Extension(kind): Extension<ResourceKind>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let document = ResourceRepo::find_by_id(&state.pool, kind, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::with_media(document, &state.media)))
}

/// POST /api/v1/resources/{kind}
pub async fn create_document(
    RequireAdmin(admin): RequireAdmin,
    Extension(kind): Extension<ResourceKind>,
    State(state): State<AppState>,
    Json(input): Json<CreateResourceDocument>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let document = ResourceRepo::create(&state.pool, kind, &input).await?;

    tracing::info!(
        id = document.id,
        kind = kind.value(),
        user_id = admin.user_id,
        "Resource document created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_media(document, &state.media)),
    ))
}

/// PUT /api/v1/resources/{kind}/{id}
pub async fn update_document(
    RequireAdmin(_admin): RequireAdmin,
    Extension(kind): Extension<ResourceKind>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateResourceDocument>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let document = ResourceRepo::update(&state.pool, kind, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::with_media(document, &state.media)))
}

/// DELETE /api/v1/resources/{kind}/{id}
pub async fn delete_document(
    RequireAdmin(_admin): RequireAdmin,
    Extension(kind): Extension<ResourceKind>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ResourceRepo::delete(&state.pool, kind, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(id, kind = kind.value(), "Resource document deleted");
    Ok(StatusCode::NO_CONTENT)
}
