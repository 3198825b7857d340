//! Contact-form and donation-intent submissions.

use pwatch_core::choices::{display_label, ContactStatus, DonationMethod, DonationStatus};
use pwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `contact_submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactSubmission {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactSubmissionView {
    #[serde(flatten)]
    pub submission: ContactSubmission,
    pub status_display: String,
}

impl From<ContactSubmission> for ContactSubmissionView {
    fn from(submission: ContactSubmission) -> Self {
        Self {
            status_display: display_label::<ContactStatus>(&submission.status),
            submission,
        }
    }
}

/// A row from the `donation_submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DonationSubmission {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub country: String,
    pub address: String,
    pub donation_method: String,
    pub message: String,
    pub status: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct DonationSubmissionView {
    #[serde(flatten)]
    pub submission: DonationSubmission,
    pub donation_method_display: String,
    pub status_display: String,
}

impl From<DonationSubmission> for DonationSubmissionView {
    fn from(submission: DonationSubmission) -> Self {
        Self {
            donation_method_display: display_label::<DonationMethod>(&submission.donation_method),
            status_display: display_label::<DonationStatus>(&submission.status),
            submission,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Public contact-form payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewContactSubmission {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 500))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub message: String,
}

/// Public donation-intent payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewDonationSubmission {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub country: Option<String>,
    pub address: Option<String>,
    pub donation_method: Option<String>,
    pub message: Option<String>,
}

/// Request-origin metadata captured alongside public submissions.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: String,
}

/// Staff status change for either submission type.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSubmissionStatus {
    pub status: String,
}
