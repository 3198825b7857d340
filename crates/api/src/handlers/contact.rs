//! Handlers for contact-form and donation-intent submissions.
//!
//! Anyone may submit; only staff can read, triage or delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pwatch_core::choices::{
    validate_choice, validate_optional_choice, ContactStatus, DonationMethod, DonationStatus,
};
use pwatch_core::error::CoreError;
use pwatch_core::types::DbId;
use pwatch_db::models::contact::{
    ContactSubmissionView, DonationSubmissionView, NewContactSubmission, NewDonationSubmission,
    UpdateSubmissionStatus,
};
use pwatch_db::repositories::{ContactRepo, DonationRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::client::ClientMeta;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SubmissionFilters {
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DonationFilters {
    pub status: Option<String>,
    pub donation_method: Option<String>,
}

// ---------------------------------------------------------------------------
// Contact submissions
// ---------------------------------------------------------------------------

/// POST /api/v1/contact/submissions (public)
pub async fn submit_contact(
    ClientMeta(client): ClientMeta,
    State(state): State<AppState>,
    Json(input): Json<NewContactSubmission>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let submission = ContactRepo::create(&state.pool, &input, &client).await?;

    tracing::info!(
        submission_id = submission.id,
        ip = client.ip_address.as_deref().unwrap_or("-"),
        "Contact submission received",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ContactSubmissionView::from(submission),
        }),
    ))
}

/// GET /api/v1/contact/submissions
pub async fn list_contact(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filters): Query<SubmissionFilters>,
) -> AppResult<impl IntoResponse> {
    let query = params.into_query().filter_opt("status", filters.status);
    let page = ContactRepo::list(&state.pool, &query)
        .await?
        .map(ContactSubmissionView::from);
    Ok(Json(PaginatedResponse::from(page)))
}

/// GET /api/v1/contact/submissions/{id}
pub async fn get_contact(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let submission = ContactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ContactSubmission", id)))?;
    Ok(Json(DataResponse {
        data: ContactSubmissionView::from(submission),
    }))
}

/// PUT /api/v1/contact/submissions/{id}
pub async fn update_contact_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubmissionStatus>,
) -> AppResult<impl IntoResponse> {
    validate_choice::<ContactStatus>("status", &input.status)?;
    let submission = ContactRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ContactSubmission", id)))?;

    tracing::info!(
        submission_id = id,
        status = %submission.status,
        user_id = admin.user_id,
        "Contact submission status changed",
    );

    Ok(Json(DataResponse {
        data: ContactSubmissionView::from(submission),
    }))
}

/// DELETE /api/v1/contact/submissions/{id}
pub async fn delete_contact(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ContactRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("ContactSubmission", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Donation submissions
// ---------------------------------------------------------------------------

/// POST /api/v1/contact/donations (public)
pub async fn submit_donation(
    ClientMeta(client): ClientMeta,
    State(state): State<AppState>,
    Json(input): Json<NewDonationSubmission>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_optional_choice::<DonationMethod>(
        "donation_method",
        input.donation_method.as_deref().filter(|m| !m.is_empty()),
    )?;

    let submission = DonationRepo::create(&state.pool, &input, &client).await?;

    tracing::info!(
        submission_id = submission.id,
        method = %submission.donation_method,
        "Donation submission received",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: DonationSubmissionView::from(submission),
        }),
    ))
}

/// GET /api/v1/contact/donations
pub async fn list_donations(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filters): Query<DonationFilters>,
) -> AppResult<impl IntoResponse> {
    let query = params
        .into_query()
        .filter_opt("status", filters.status)
        .filter_opt("donation_method", filters.donation_method);
    let page = DonationRepo::list(&state.pool, &query)
        .await?
        .map(DonationSubmissionView::from);
    Ok(Json(PaginatedResponse::from(page)))
}

/// GET /api/v1/contact/donations/{id}
pub async fn get_donation(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let submission = DonationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("DonationSubmission", id)))?;
    Ok(Json(DataResponse {
        data: DonationSubmissionView::from(submission),
    }))
}

/// PUT /api/v1/contact/donations/{id}
pub async fn update_donation_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubmissionStatus>,
) -> AppResult<impl IntoResponse> {
    validate_choice::<DonationStatus>("status", &input.status)?;
    let submission = DonationRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("DonationSubmission", id)))?;

    tracing::info!(
        submission_id = id,
        status = %submission.status,
        user_id = admin.user_id,
        "Donation status changed",
    );

    Ok(Json(DataResponse {
        data: DonationSubmissionView::from(submission),
    }))
}

/// DELETE /api/v1/contact/donations/{id}
pub async fn delete_donation(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !DonationRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("DonationSubmission", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
