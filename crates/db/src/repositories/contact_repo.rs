//! Repositories for `contact_submissions` and `donation_submissions`.

use pwatch_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{fetch_page, ListQuery, ListSpec, Page};
use crate::models::contact::{
    ClientInfo, ContactSubmission, DonationSubmission, NewContactSubmission,
    NewDonationSubmission,
};
use crate::repositories::delete_by_id;

const CONTACT_COLUMNS: &str = "\
    id, name, email, subject, message, status, ip_address, user_agent, \
    created_at, updated_at";

const DONATION_COLUMNS: &str = "\
    id, name, email, country, address, donation_method, message, status, \
    ip_address, user_agent, created_at, updated_at";

pub struct ContactRepo;

impl ContactRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "contact_submissions",
        columns: CONTACT_COLUMNS,
        search_columns: &["name", "email", "subject"],
        ordering_fields: &["created_at", "status"],
        default_ordering: &["-created_at"],
        page_size: 20,
    };

    pub async fn list(
        pool: &PgPool,
        query: &ListQuery,
    ) -> Result<Page<ContactSubmission>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContactSubmission>, sqlx::Error> {
        let query = format!("SELECT {CONTACT_COLUMNS} FROM contact_submissions WHERE id = $1");
        sqlx::query_as::<_, ContactSubmission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        dto: &NewContactSubmission,
        client: &ClientInfo,
    ) -> Result<ContactSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_submissions \
                 (name, email, subject, message, ip_address, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {CONTACT_COLUMNS}"
        );
        sqlx::query_as::<_, ContactSubmission>(&query)
            .bind(&dto.name)
            .bind(&dto.email)
            .bind(&dto.subject)
            .bind(&dto.message)
            .bind(&client.ip_address)
            .bind(&client.user_agent)
            .fetch_one(pool)
            .await
    }

    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<ContactSubmission>, sqlx::Error> {
        let query = format!(
            "UPDATE contact_submissions SET status = $2 WHERE id = $1 RETURNING {CONTACT_COLUMNS}"
        );
        sqlx::query_as::<_, ContactSubmission>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, "contact_submissions", id).await
    }
}

pub struct DonationRepo;

impl DonationRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "donation_submissions",
        columns: DONATION_COLUMNS,
        search_columns: &["name", "email", "country"],
        ordering_fields: &["created_at", "status"],
        default_ordering: &["-created_at"],
        page_size: 20,
    };

    pub async fn list(
        pool: &PgPool,
        query: &ListQuery,
    ) -> Result<Page<DonationSubmission>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DonationSubmission>, sqlx::Error> {
        let query = format!("SELECT {DONATION_COLUMNS} FROM donation_submissions WHERE id = $1");
        sqlx::query_as::<_, DonationSubmission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        dto: &NewDonationSubmission,
        client: &ClientInfo,
    ) -> Result<DonationSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO donation_submissions \
                 (name, email, country, address, donation_method, message, ip_address, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {DONATION_COLUMNS}"
        );
        sqlx::query_as::<_, DonationSubmission>(&query)
            .bind(&dto.name)
            .bind(&dto.email)
            .bind(dto.country.as_deref().unwrap_or("Uganda"))
            .bind(dto.address.as_deref().unwrap_or(""))
            .bind(dto.donation_method.as_deref().unwrap_or(""))
            .bind(dto.message.as_deref().unwrap_or(""))
            .bind(&client.ip_address)
            .bind(&client.user_agent)
            .fetch_one(pool)
            .await
    }

    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<DonationSubmission>, sqlx::Error> {
        let query = format!(
            "UPDATE donation_submissions SET status = $2 WHERE id = $1 RETURNING {DONATION_COLUMNS}"
        );
        sqlx::query_as::<_, DonationSubmission>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, "donation_submissions", id).await
    }
}
