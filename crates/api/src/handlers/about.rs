//! Handlers for the about page: objectives, team members, who-we-are,
//! our story, what-sets-us-apart and partners.
//!
//! Objectives and what-sets-us-apart share one set of handlers; the router
//! selects the table with an [`Extension<HighlightTable>`] layer.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use pwatch_core::error::CoreError;
use pwatch_core::types::DbId;
use pwatch_db::models::about::{
    CreateHighlight, CreateOurStory, CreatePartner, CreateTeamMember, CreateWhoWeAre,
    UpdateHighlight, UpdateOurStory, UpdatePartner, UpdateTeamMember, UpdateWhoWeAre,
};
use pwatch_db::repositories::{
    HighlightRepo, HighlightTable, OurStoryRepo, PartnerRepo, TeamMemberRepo, WhoWeAreRepo,
};
use validator::Validate;

use super::{scope_active, visible_to};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{OptionalAdmin, RequireAdmin};
use crate::query::{ActiveFilter, ListParams};
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Objectives / what sets us apart
// ---------------------------------------------------------------------------

/// GET /api/v1/about/objectives, /api/v1/about/what-sets-us-apart
pub async fn list_highlights(
    staff: OptionalAdmin,
    Extension(table): Extension<HighlightTable>,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<ActiveFilter>,
) -> AppResult<impl IntoResponse> {
    let query = scope_active(params.into_query(), &staff, filter.is_active);
    let page = HighlightRepo::list(&state.pool, table, &query).await?;
    Ok(Json(PaginatedResponse::from(page)))
}

/// GET /api/v1/about/objectives/{id}
pub async fn get_highlight(
    staff: OptionalAdmin,
    Extension(table): Extension<HighlightTable>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = HighlightRepo::find_by_id(&state.pool, table, id)
        .await?
        .filter(|row| visible_to(row.is_active, &staff))
        .ok_or_else(|| AppError::Core(CoreError::not_found(table.entity(), id)))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/about/objectives
pub async fn create_highlight(
    RequireAdmin(admin): RequireAdmin,
    Extension(table): Extension<HighlightTable>,
    State(state): State<AppState>,
    Json(input): Json<CreateHighlight>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let item = HighlightRepo::create(&state.pool, table, &input).await?;

    tracing::info!(
        id = item.id,
        table = table.table(),
        user_id = admin.user_id,
        "About highlight created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/about/objectives/{id}
pub async fn update_highlight(
    RequireAdmin(_admin): RequireAdmin,
    Extension(table): Extension<HighlightTable>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateHighlight>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let item = HighlightRepo::update(&state.pool, table, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(table.entity(), id)))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/about/objectives/{id}
pub async fn delete_highlight(
    RequireAdmin(_admin): RequireAdmin,
    Extension(table): Extension<HighlightTable>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !HighlightRepo::delete(&state.pool, table, id).await? {
        return Err(AppError::Core(CoreError::not_found(table.entity(), id)));
    }
    tracing::info!(id, table = table.table(), "About highlight deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Team members
// ---------------------------------------------------------------------------

/// GET /api/v1/about/team-members
pub async fn list_team_members(
    staff: OptionalAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<ActiveFilter>,
) -> AppResult<impl IntoResponse> {
    let query = scope_active(params.into_query(), &staff, filter.is_active);
    let page = TeamMemberRepo::list(&state.pool, &query).await?;
    Ok(Json(PaginatedResponse::with_media(page, &state.media)))
}

/// GET /api/v1/about/team-members/{id}
pub async fn get_team_member(
    staff: OptionalAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let member = TeamMemberRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|row| visible_to(row.is_active, &staff))
        .ok_or_else(|| AppError::Core(CoreError::not_found("TeamMember", id)))?;
    Ok(Json(DataResponse::with_media(member, &state.media)))
}

/// POST /api/v1/about/team-members
pub async fn create_team_member(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateTeamMember>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let member = TeamMemberRepo::create(&state.pool, &input).await?;

    tracing::info!(id = member.id, user_id = admin.user_id, "Team member created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_media(member, &state.media)),
    ))
}

/// PUT /api/v1/about/team-members/{id}
pub async fn update_team_member(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTeamMember>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let member = TeamMemberRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("TeamMember", id)))?;
    Ok(Json(DataResponse::with_media(member, &state.media)))
}

/// DELETE /api/v1/about/team-members/{id}
pub async fn delete_team_member(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TeamMemberRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("TeamMember", id)));
    }
    tracing::info!(id, "Team member deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Who we are
// ---------------------------------------------------------------------------

/// GET /api/v1/about/who-we-are
pub async fn list_who_we_are(
    staff: OptionalAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<ActiveFilter>,
) -> AppResult<impl IntoResponse> {
    let query = scope_active(params.into_query(), &staff, filter.is_active);
    let page = WhoWeAreRepo::list(&state.pool, &query).await?;
    Ok(Json(PaginatedResponse::with_media(page, &state.media)))
}

/// GET /api/v1/about/who-we-are/{id}
pub async fn get_who_we_are(
    staff: OptionalAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let block = WhoWeAreRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|row| visible_to(row.is_active, &staff))
        .ok_or_else(|| AppError::Core(CoreError::not_found("WhoWeAre", id)))?;
    Ok(Json(DataResponse::with_media(block, &state.media)))
}

/// POST /api/v1/about/who-we-are
pub async fn create_who_we_are(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateWhoWeAre>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let block = WhoWeAreRepo::create(&state.pool, &input).await?;
    tracing::info!(id = block.id, "Who-we-are block created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_media(block, &state.media)),
    ))
}

/// PUT /api/v1/about/who-we-are/{id}
pub async fn update_who_we_are(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWhoWeAre>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let block = WhoWeAreRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("WhoWeAre", id)))?;
    Ok(Json(DataResponse::with_media(block, &state.media)))
}

/// DELETE /api/v1/about/who-we-are/{id}
pub async fn delete_who_we_are(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !WhoWeAreRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("WhoWeAre", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Our story
// ---------------------------------------------------------------------------

/// GET /api/v1/about/our-story
pub async fn list_our_story(
    staff: OptionalAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<ActiveFilter>,
) -> AppResult<impl IntoResponse> {
    let query = scope_active(params.into_query(), &staff, filter.is_active);
    let page = OurStoryRepo::list(&state.pool, &query).await?;
    Ok(Json(PaginatedResponse::with_media(page, &state.media)))
}

/// GET /api/v1/about/our-story/{id}
pub async fn get_our_story(
    staff: OptionalAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = OurStoryRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|row| visible_to(row.is_active, &staff))
        .ok_or_else(|| AppError::Core(CoreError::not_found("OurStory", id)))?;
    Ok(Json(DataResponse::with_media(entry, &state.media)))
}

/// POST /api/v1/about/our-story
pub async fn create_our_story(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateOurStory>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let entry = OurStoryRepo::create(&state.pool, &input).await?;
    tracing::info!(id = entry.id, "Our-story entry created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_media(entry, &state.media)),
    ))
}

/// PUT /api/v1/about/our-story/{id}
pub async fn update_our_story(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOurStory>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let entry = OurStoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("OurStory", id)))?;
    Ok(Json(DataResponse::with_media(entry, &state.media)))
}

/// DELETE /api/v1/about/our-story/{id}
pub async fn delete_our_story(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !OurStoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("OurStory", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Partners
// ---------------------------------------------------------------------------

/// GET /api/v1/about/partners
pub async fn list_partners(
    staff: OptionalAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<ActiveFilter>,
) -> AppResult<impl IntoResponse> {
    let query = scope_active(params.into_query(), &staff, filter.is_active);
    let page = PartnerRepo::list(&state.pool, &query).await?;
    Ok(Json(PaginatedResponse::with_media(page, &state.media)))
}

/// GET /api/v1/about/partners/{id}
pub async fn get_partner(
    staff: OptionalAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let partner = PartnerRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|row| visible_to(row.is_active, &staff))
        .ok_or_else(|| AppError::Core(CoreError::not_found("Partner", id)))?;
    Ok(Json(DataResponse::with_media(partner, &state.media)))
}

/// POST /api/v1/about/partners
pub async fn create_partner(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreatePartner>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let partner = PartnerRepo::create(&state.pool, &input).await?;
    tracing::info!(id = partner.id, user_id = admin.user_id, "Partner created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_media(partner, &state.media)),
    ))
}

/// PUT /api/v1/about/partners/{id}
pub async fn update_partner(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePartner>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let partner = PartnerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Partner", id)))?;
    Ok(Json(DataResponse::with_media(partner, &state.media)))
}

/// DELETE /api/v1/about/partners/{id}
pub async fn delete_partner(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PartnerRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Partner", id)));
    }
    tracing::info!(id, "Partner deleted");
    Ok(StatusCode::NO_CONTENT)
}
