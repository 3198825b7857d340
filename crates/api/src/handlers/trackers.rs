//! Handlers for the parliamentary trackers: bills, readings, MPs,
//! committees, Hansards and order papers.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use pwatch_core::choices::{
    validate_choice, validate_optional_choice, BillStatus, BillType, ReadingStage,
};
use pwatch_core::error::CoreError;
use pwatch_core::types::{Date, DbId};
use pwatch_db::models::tracker::{
    BillDetail, BillReadingView, BillSummary, Committee, CommitteeDetail, CreateBill,
    CreateBillReading, CreateCommittee, CreateMp, CreateSittingDocument, EngagementCounter,
    SittingDocumentKind, UpdateBill, UpdateBillReading, UpdateCommittee, UpdateMp,
    UpdateSittingDocument,
};
use pwatch_db::repositories::{
    BillReadingRepo, BillRepo, CommitteeRepo, MpRepo, SittingDocumentRepo,
};
use pwatch_db::DbPool;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct BillFilters {
    pub bill_type: Option<String>,
    pub status: Option<String>,
    pub year_introduced: Option<Date>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReadingFilters {
    pub bill: Option<DbId>,
    pub stage: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MpFilters {
    pub party: Option<String>,
    pub district: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommitteeFilters {
    pub committee_type: Option<String>,
    pub is_active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Bills
// ---------------------------------------------------------------------------

/// GET /api/v1/trackers/bills
pub async fn list_bills(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filters): Query<BillFilters>,
) -> AppResult<impl IntoResponse> {
    let query = params
        .into_query()
        .filter_opt("bill_type", filters.bill_type)
        .filter_opt("status", filters.status)
        .filter_opt("year_introduced", filters.year_introduced);
    let page = BillRepo::list(&state.pool, &query)
        .await?
        .map(BillSummary::from);
    Ok(Json(PaginatedResponse::from(page)))
}

/// GET /api/v1/trackers/bills/{id}
///
/// Full bill with its readings in date order.
pub async fn get_bill(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = bill_detail(&state.pool, id).await?;
    Ok(Json(DataResponse::with_media(detail, &state.media)))
}

/// POST /api/v1/trackers/bills
pub async fn create_bill(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateBill>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_choice::<BillType>("bill_type", &input.bill_type)?;
    validate_optional_choice::<BillStatus>("status", input.status.as_deref())?;

    let bill = BillRepo::create(&state.pool, &input).await?;
    tracing::info!(bill_id = bill.id, user_id = admin.user_id, "Bill created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: BillDetail::new(bill, Vec::new()),
        }),
    ))
}

/// PUT /api/v1/trackers/bills/{id}
pub async fn update_bill(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBill>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_optional_choice::<BillType>("bill_type", input.bill_type.as_deref())?;
    validate_optional_choice::<BillStatus>("status", input.status.as_deref())?;

    BillRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Bill", id)))?;
    tracing::info!(bill_id = id, "Bill updated");

    let detail = bill_detail(&state.pool, id).await?;
    Ok(Json(DataResponse::with_media(detail, &state.media)))
}

/// DELETE /api/v1/trackers/bills/{id}
///
/// Readings are removed with the bill.
pub async fn delete_bill(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !BillRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Bill", id)));
    }
    tracing::info!(bill_id = id, "Bill deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/trackers/bills/{id}/like
pub async fn like_bill(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    bump(&state.pool, id, EngagementCounter::Likes).await
}

/// POST /api/v1/trackers/bills/{id}/comment
pub async fn comment_bill(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    bump(&state.pool, id, EngagementCounter::Comments).await
}

/// POST /api/v1/trackers/bills/{id}/share
pub async fn share_bill(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    bump(&state.pool, id, EngagementCounter::Shares).await
}

/// Atomically increment one counter and return `{"<counter>": new_value}`.
async fn bump(
    pool: &DbPool,
    id: DbId,
    counter: EngagementCounter,
) -> AppResult<Json<HashMap<&'static str, i32>>> {
    let value = BillRepo::increment(pool, id, counter)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Bill", id)))?;

    tracing::info!(bill_id = id, counter = counter.column(), value, "Bill engagement recorded");

    Ok(Json(HashMap::from([(counter.column(), value)])))
}

async fn bill_detail(pool: &DbPool, id: DbId) -> AppResult<BillDetail> {
    let bill = BillRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Bill", id)))?;
    let readings = BillReadingRepo::list_for_bill(pool, id).await?;
    Ok(BillDetail::new(bill, readings))
}

// ---------------------------------------------------------------------------
// Bill readings
// ---------------------------------------------------------------------------

/// GET /api/v1/trackers/readings
pub async fn list_readings(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filters): Query<ReadingFilters>,
) -> AppResult<impl IntoResponse> {
    let query = params
        .into_query()
        .filter_opt("bill_id", filters.bill)
        .filter_opt("stage", filters.stage);
    let page = BillReadingRepo::list(&state.pool, &query)
        .await?
        .map(BillReadingView::from);
    Ok(Json(PaginatedResponse::with_media(page, &state.media)))
}

/// GET /api/v1/trackers/readings/{id}
pub async fn get_reading(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reading = BillReadingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("BillReading", id)))?;
    Ok(Json(DataResponse::with_media(
        BillReadingView::from(reading),
        &state.media,
    )))
}

/// POST /api/v1/trackers/readings
///
/// A second reading at the same stage of the same bill is a 409.
pub async fn create_reading(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateBillReading>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_choice::<ReadingStage>("stage", &input.stage)?;

    let reading = BillReadingRepo::create(&state.pool, &input).await?;
    tracing::info!(
        reading_id = reading.id,
        bill_id = reading.bill_id,
        stage = %reading.stage,
        "Bill reading created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_media(
            BillReadingView::from(reading),
            &state.media,
        )),
    ))
}

/// PUT /api/v1/trackers/readings/{id}
pub async fn update_reading(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBillReading>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_optional_choice::<ReadingStage>("stage", input.stage.as_deref())?;

    let reading = BillReadingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("BillReading", id)))?;
    Ok(Json(DataResponse::with_media(
        BillReadingView::from(reading),
        &state.media,
    )))
}

/// DELETE /api/v1/trackers/readings/{id}
pub async fn delete_reading(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !BillReadingRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("BillReading", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// MPs
// ---------------------------------------------------------------------------

/// GET /api/v1/trackers/mps
pub async fn list_mps(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filters): Query<MpFilters>,
) -> AppResult<impl IntoResponse> {
    let query = params
        .into_query()
        .filter_opt("party", filters.party)
        .filter_opt("district", filters.district)
        .filter_opt("is_active", filters.is_active);
    let page = MpRepo::list(&state.pool, &query).await?;
    Ok(Json(PaginatedResponse::with_media(page, &state.media)))
}

/// GET /api/v1/trackers/mps/{id}
pub async fn get_mp(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mp = MpRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Mp", id)))?;
    Ok(Json(DataResponse::with_media(mp, &state.media)))
}

/// POST /api/v1/trackers/mps
pub async fn create_mp(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateMp>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let mp = MpRepo::create(&state.pool, &input).await?;
    tracing::info!(mp_id = mp.id, user_id = admin.user_id, "MP created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_media(mp, &state.media)),
    ))
}

/// PUT /api/v1/trackers/mps/{id}
pub async fn update_mp(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMp>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let mp = MpRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Mp", id)))?;
    Ok(Json(DataResponse::with_media(mp, &state.media)))
}

/// DELETE /api/v1/trackers/mps/{id}
///
/// Committees keep existing: chair/deputy references are nulled and the
/// MP's memberships are removed.
pub async fn delete_mp(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !MpRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Mp", id)));
    }
    tracing::info!(mp_id = id, "MP deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Committees
// ---------------------------------------------------------------------------

/// GET /api/v1/trackers/committees
pub async fn list_committees(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filters): Query<CommitteeFilters>,
) -> AppResult<impl IntoResponse> {
    let query = params
        .into_query()
        .filter_opt("committee_type", filters.committee_type)
        .filter_opt("is_active", filters.is_active);
    let page = CommitteeRepo::list(&state.pool, &query).await?;
    Ok(Json(PaginatedResponse::from(page)))
}

/// GET /api/v1/trackers/committees/{id}
///
/// Chair, deputy chair and members are resolved to MP summaries.
pub async fn get_committee(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let committee = CommitteeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Committee", id)))?;
    let detail = committee_detail(&state.pool, committee).await?;
    Ok(Json(DataResponse::with_media(detail, &state.media)))
}

/// POST /api/v1/trackers/committees
pub async fn create_committee(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCommittee>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_term(input.begin_date, input.end_date)?;

    let committee = CommitteeRepo::create(&state.pool, &input).await?;
    tracing::info!(
        committee_id = committee.id,
        members = committee.member_ids.len(),
        user_id = admin.user_id,
        "Committee created",
    );

    let detail = committee_detail(&state.pool, committee).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_media(detail, &state.media)),
    ))
}

/// PUT /api/v1/trackers/committees/{id}
///
/// `member_ids`, when sent, replaces the whole membership. An explicit
/// `null` for chair, deputy chair or a term date clears it.
pub async fn update_committee(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCommittee>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let existing = CommitteeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Committee", id)))?;
    validate_term(
        input.begin_date.unwrap_or(existing.begin_date),
        input.end_date.unwrap_or(existing.end_date),
    )?;

    let committee = CommitteeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Committee", id)))?;
    tracing::info!(committee_id = id, "Committee updated");

    let detail = committee_detail(&state.pool, committee).await?;
    Ok(Json(DataResponse::with_media(detail, &state.media)))
}

/// DELETE /api/v1/trackers/committees/{id}
pub async fn delete_committee(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CommitteeRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Committee", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// A committee's term cannot end before it begins.
fn validate_term(begin: Option<Date>, end: Option<Date>) -> AppResult<()> {
    if let (Some(begin), Some(end)) = (begin, end) {
        if end < begin {
            return Err(AppError::Core(CoreError::Validation(
                "end_date must not be earlier than begin_date".into(),
            )));
        }
    }
    Ok(())
}

async fn committee_detail(pool: &DbPool, committee: Committee) -> AppResult<CommitteeDetail> {
    let mut ids = committee.member_ids.clone();
    ids.extend(committee.chair_id);
    ids.extend(committee.deputy_chair_id);
    ids.sort_unstable();
    ids.dedup();

    let summaries = MpRepo::summaries(pool, &ids).await?;
    let find = |id: Option<DbId>| {
        id.and_then(|id| summaries.iter().find(|mp| mp.id == id).cloned())
    };

    let chair = find(committee.chair_id);
    let deputy_chair = find(committee.deputy_chair_id);
    let members = summaries
        .iter()
        .filter(|mp| committee.member_ids.contains(&mp.id))
        .cloned()
        .collect();

    Ok(CommitteeDetail {
        committee,
        chair,
        deputy_chair,
        members,
    })
}

// ---------------------------------------------------------------------------
// Hansards and order papers
// ---------------------------------------------------------------------------

/// GET /api/v1/trackers/hansards, /api/v1/trackers/order-papers
pub async fn list_sitting_documents(
    Extension(kind): Extension<SittingDocumentKind>,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let page = SittingDocumentRepo::list(&state.pool, kind, &params.into_query()).await?;
    Ok(Json(PaginatedResponse::with_media(page, &state.media)))
}

/// GET /api/v1/trackers/hansards/{id}
pub async fn get_sitting_document(
    Extension(kind): Extension<SittingDocumentKind>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let document = SittingDocumentRepo::find_by_id(&state.pool, kind, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(kind.entity(), id)))?;
    Ok(Json(DataResponse::with_media(document, &state.media)))
}

/// POST /api/v1/trackers/hansards
pub async fn create_sitting_document(
    RequireAdmin(admin): RequireAdmin,
    Extension(kind): Extension<SittingDocumentKind>,
    State(state): State<AppState>,
    Json(input): Json<CreateSittingDocument>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let document = SittingDocumentRepo::create(&state.pool, kind, &input).await?;
    tracing::info!(
        id = document.id,
        table = kind.table(),
        user_id = admin.user_id,
        "Sitting document created",
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_media(document, &state.media)),
    ))
}

/// PUT /api/v1/trackers/hansards/{id}
pub async fn update_sitting_document(
    RequireAdmin(_admin): RequireAdmin,
    Extension(kind): Extension<SittingDocumentKind>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSittingDocument>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let document = SittingDocumentRepo::update(&state.pool, kind, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(kind.entity(), id)))?;
    Ok(Json(DataResponse::with_media(document, &state.media)))
}

/// DELETE /api/v1/trackers/hansards/{id}
pub async fn delete_sitting_document(
    RequireAdmin(_admin): RequireAdmin,
    Extension(kind): Extension<SittingDocumentKind>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SittingDocumentRepo::delete(&state.pool, kind, id).await? {
        return Err(AppError::Core(CoreError::not_found(kind.entity(), id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn term_may_be_open_ended() {
        assert!(validate_term(Some(date(2021, 5, 1)), None).is_ok());
        assert!(validate_term(None, Some(date(2026, 5, 1))).is_ok());
    }

    #[test]
    fn term_may_start_and_end_same_day() {
        assert!(validate_term(Some(date(2021, 5, 1)), Some(date(2021, 5, 1))).is_ok());
    }

    #[test]
    fn term_ending_before_start_is_rejected() {
        assert_matches!(
            validate_term(Some(date(2026, 5, 1)), Some(date(2021, 5, 1))),
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }
}
