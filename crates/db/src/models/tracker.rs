//! Parliamentary trackers: bills and their readings, MPs, committees,
//! Hansard transcripts and order papers.

use pwatch_core::choices::{display_label, BillStatus, BillType, ReadingStage};
use pwatch_core::media::{MediaFields, MediaUrlBuilder};
use pwatch_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Bills
// ---------------------------------------------------------------------------

/// A row from the `bills` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bill {
    pub id: DbId,
    pub title: String,
    pub bill_type: String,
    pub year_introduced: Date,
    pub mover: String,
    pub assigned_to: String,
    pub status: String,
    pub description: String,
    pub video_url: Option<String>,
    pub likes: i32,
    pub comments: i32,
    pub shares: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// List shape for bills.
#[derive(Debug, Clone, Serialize)]
pub struct BillSummary {
    pub id: DbId,
    pub title: String,
    pub bill_type: String,
    pub bill_type_display: String,
    pub year_introduced: Date,
    pub mover: String,
    pub status: String,
    pub status_display: String,
    pub created_at: Timestamp,
}

impl From<Bill> for BillSummary {
    fn from(b: Bill) -> Self {
        Self {
            bill_type_display: display_label::<BillType>(&b.bill_type),
            status_display: display_label::<BillStatus>(&b.status),
            id: b.id,
            title: b.title,
            bill_type: b.bill_type,
            year_introduced: b.year_introduced,
            mover: b.mover,
            status: b.status,
            created_at: b.created_at,
        }
    }
}

/// Full bill with display labels and its readings in date order.
#[derive(Debug, Clone, Serialize)]
pub struct BillDetail {
    #[serde(flatten)]
    pub bill: Bill,
    pub bill_type_display: String,
    pub status_display: String,
    pub readings: Vec<BillReadingView>,
}

impl BillDetail {
    pub fn new(bill: Bill, readings: Vec<BillReading>) -> Self {
        Self {
            bill_type_display: display_label::<BillType>(&bill.bill_type),
            status_display: display_label::<BillStatus>(&bill.status),
            bill,
            readings: readings.into_iter().map(BillReadingView::from).collect(),
        }
    }
}

impl MediaFields for BillDetail {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        self.readings.absolutize(media);
    }
}

/// Public engagement counters on a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementCounter {
    Likes,
    Comments,
    Shares,
}

impl EngagementCounter {
    /// Column name, also used as the response key.
    pub fn column(self) -> &'static str {
        match self {
            Self::Likes => "likes",
            Self::Comments => "comments",
            Self::Shares => "shares",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBill {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub bill_type: String,
    pub year_introduced: Date,
    #[validate(length(min = 1, max = 200))]
    pub mover: String,
    #[validate(length(min = 1, max = 200))]
    pub assigned_to: String,
    pub status: Option<String>,
    pub description: Option<String>,
    #[validate(url)]
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBill {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,
    pub bill_type: Option<String>,
    pub year_introduced: Option<Date>,
    #[validate(length(min = 1, max = 200))]
    pub mover: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub assigned_to: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    #[validate(url)]
    #[serde(default, with = "double_option")]
    pub video_url: Option<Option<String>>,
}

// ---------------------------------------------------------------------------
// Bill readings
// ---------------------------------------------------------------------------

/// A row from the `bill_readings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BillReading {
    pub id: DbId,
    pub bill_id: DbId,
    pub stage: String,
    pub date: Date,
    pub details: String,
    pub document: Option<String>,
    pub committee_report: Option<String>,
    pub analysis: Option<String>,
    pub mp_photo: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct BillReadingView {
    #[serde(flatten)]
    pub reading: BillReading,
    pub stage_display: String,
}

impl From<BillReading> for BillReadingView {
    fn from(reading: BillReading) -> Self {
        Self {
            stage_display: display_label::<ReadingStage>(&reading.stage),
            reading,
        }
    }
}

impl MediaFields for BillReadingView {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        let r = &mut self.reading;
        media.rewrite(&mut r.document);
        media.rewrite(&mut r.committee_report);
        media.rewrite(&mut r.analysis);
        media.rewrite(&mut r.mp_photo);
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBillReading {
    pub bill_id: DbId,
    pub stage: String,
    pub date: Date,
    #[validate(length(min = 1))]
    pub details: String,
    pub document: Option<String>,
    pub committee_report: Option<String>,
    pub analysis: Option<String>,
    pub mp_photo: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBillReading {
    pub stage: Option<String>,
    pub date: Option<Date>,
    #[validate(length(min = 1))]
    pub details: Option<String>,
    #[serde(default, with = "double_option")]
    pub document: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub committee_report: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub analysis: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub mp_photo: Option<Option<String>>,
}

// ---------------------------------------------------------------------------
// MPs
// ---------------------------------------------------------------------------

/// A row from the `mps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Mp {
    pub id: DbId,
    pub name: String,
    pub constituency: String,
    pub district: String,
    pub party: String,
    pub photo: Option<String>,
    pub email: String,
    pub phone: String,
    pub bio: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaFields for Mp {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        media.rewrite(&mut self.photo);
    }
}

/// Compact MP shape nested inside committee details.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MpSummary {
    pub id: DbId,
    pub name: String,
    pub constituency: String,
    pub party: String,
    pub photo: Option<String>,
}

impl MediaFields for MpSummary {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        media.rewrite(&mut self.photo);
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMp {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 200))]
    pub constituency: Option<String>,
    #[validate(length(max = 100))]
    pub district: Option<String>,
    #[validate(length(max = 100))]
    pub party: Option<String>,
    pub photo: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMp {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 200))]
    pub constituency: Option<String>,
    #[validate(length(max = 100))]
    pub district: Option<String>,
    #[validate(length(max = 100))]
    pub party: Option<String>,
    #[serde(default, with = "double_option")]
    pub photo: Option<Option<String>>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub is_active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Committees
// ---------------------------------------------------------------------------

/// A row from the `committees` table with its member ids aggregated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Committee {
    pub id: DbId,
    pub name: String,
    pub committee_type: String,
    pub description: String,
    pub chair_id: Option<DbId>,
    pub deputy_chair_id: Option<DbId>,
    pub member_ids: Vec<DbId>,
    pub begin_date: Option<Date>,
    pub end_date: Option<Date>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Committee with chair, deputy and members resolved to MP summaries.
#[derive(Debug, Clone, Serialize)]
pub struct CommitteeDetail {
    #[serde(flatten)]
    pub committee: Committee,
    pub chair: Option<MpSummary>,
    pub deputy_chair: Option<MpSummary>,
    pub members: Vec<MpSummary>,
}

impl MediaFields for CommitteeDetail {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        self.chair.absolutize(media);
        self.deputy_chair.absolutize(media);
        self.members.absolutize(media);
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommittee {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 100))]
    pub committee_type: Option<String>,
    pub description: Option<String>,
    pub chair_id: Option<DbId>,
    pub deputy_chair_id: Option<DbId>,
    #[serde(default)]
    pub member_ids: Vec<DbId>,
    pub begin_date: Option<Date>,
    pub end_date: Option<Date>,
    pub is_active: Option<bool>,
}

/// Partial committee update. `member_ids`, when present, replaces the whole
/// membership set.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommittee {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub committee_type: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "double_option")]
    pub chair_id: Option<Option<DbId>>,
    #[serde(default, with = "double_option")]
    pub deputy_chair_id: Option<Option<DbId>>,
    pub member_ids: Option<Vec<DbId>>,
    #[serde(default, with = "double_option")]
    pub begin_date: Option<Option<Date>>,
    #[serde(default, with = "double_option")]
    pub end_date: Option<Option<Date>>,
    pub is_active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Hansards and order papers
// ---------------------------------------------------------------------------

/// Which sitting-document table a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SittingDocumentKind {
    Hansard,
    OrderPaper,
}

impl SittingDocumentKind {
    pub fn table(self) -> &'static str {
        match self {
            Self::Hansard => "hansards",
            Self::OrderPaper => "order_papers",
        }
    }

    pub fn entity(self) -> &'static str {
        match self {
            Self::Hansard => "Hansard",
            Self::OrderPaper => "OrderPaper",
        }
    }
}

/// A row from the `hansards` or `order_papers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SittingDocument {
    pub id: DbId,
    pub title: String,
    pub sitting_date: Date,
    pub description: String,
    pub file: String,
    pub date_received: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaFields for SittingDocument {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        media.rewrite_required(&mut self.file);
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSittingDocument {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub sitting_date: Date,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub file: String,
    pub date_received: Option<Date>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSittingDocument {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub sitting_date: Option<Date>,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub file: Option<String>,
    #[serde(default, with = "double_option")]
    pub date_received: Option<Option<Date>>,
}
