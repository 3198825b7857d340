//! Repositories for the parliamentary tracker tables.

use pwatch_core::types::DbId;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use crate::listing::{fetch_page, ListQuery, ListSpec, Page};
use crate::models::tracker::{
    Bill, BillReading, Committee, CreateBill, CreateBillReading, CreateCommittee, CreateMp,
    CreateSittingDocument, EngagementCounter, Mp, MpSummary, SittingDocument, SittingDocumentKind,
    UpdateBill, UpdateBillReading, UpdateCommittee, UpdateMp, UpdateSittingDocument,
};
use crate::repositories::delete_by_id;

const BILL_COLUMNS: &str = "\
    id, title, bill_type, year_introduced, mover, assigned_to, status, \
    description, video_url, likes, comments, shares, created_at, updated_at";

const READING_COLUMNS: &str = "\
    id, bill_id, stage, date, details, document, committee_report, analysis, \
    mp_photo, created_at, updated_at";

const MP_COLUMNS: &str = "\
    id, name, constituency, district, party, photo, email, phone, bio, \
    is_active, created_at, updated_at";

const COMMITTEE_COLUMNS: &str = "\
    id, name, committee_type, description, chair_id, deputy_chair_id, \
    ARRAY(SELECT cm.mp_id FROM committee_members cm \
          WHERE cm.committee_id = committees.id ORDER BY cm.mp_id) AS member_ids, \
    begin_date, end_date, is_active, created_at, updated_at";

const SITTING_COLUMNS: &str =
    "id, title, sitting_date, description, file, date_received, created_at, updated_at";

// ---------------------------------------------------------------------------
// Bills
// ---------------------------------------------------------------------------

pub struct BillRepo;

impl BillRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "bills",
        columns: BILL_COLUMNS,
        search_columns: &["title", "mover", "assigned_to"],
        ordering_fields: &["created_at", "year_introduced", "title"],
        default_ordering: &["-created_at"],
        page_size: 20,
    };

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<Bill>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Bill>, sqlx::Error> {
        let query = format!("SELECT {BILL_COLUMNS} FROM bills WHERE id = $1");
        sqlx::query_as::<_, Bill>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, dto: &CreateBill) -> Result<Bill, sqlx::Error> {
        let query = format!(
            "INSERT INTO bills \
                 (title, bill_type, year_introduced, mover, assigned_to, status, description, video_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {BILL_COLUMNS}"
        );
        sqlx::query_as::<_, Bill>(&query)
            .bind(&dto.title)
            .bind(&dto.bill_type)
            .bind(dto.year_introduced)
            .bind(&dto.mover)
            .bind(&dto.assigned_to)
            .bind(dto.status.as_deref().unwrap_or("1st_reading"))
            .bind(dto.description.as_deref().unwrap_or(""))
            .bind(&dto.video_url)
            .fetch_one(pool)
            .await
    }

    pub async fn update(pool: &PgPool, id: DbId, dto: &UpdateBill) -> Result<Option<Bill>, sqlx::Error> {
        let query = format!(
            "UPDATE bills SET \
                 title = COALESCE($2, title), \
                 bill_type = COALESCE($3, bill_type), \
                 year_introduced = COALESCE($4, year_introduced), \
                 mover = COALESCE($5, mover), \
                 assigned_to = COALESCE($6, assigned_to), \
                 status = COALESCE($7, status), \
                 description = COALESCE($8, description), \
                 video_url = CASE WHEN $9 THEN $10 ELSE video_url END \
             WHERE id = $1 \
             RETURNING {BILL_COLUMNS}"
        );
        sqlx::query_as::<_, Bill>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.bill_type)
            .bind(dto.year_introduced)
            .bind(&dto.mover)
            .bind(&dto.assigned_to)
            .bind(&dto.status)
            .bind(&dto.description)
            .bind(dto.video_url.is_some())
            .bind(dto.video_url.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a bill; its readings go with it (`ON DELETE CASCADE`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, "bills", id).await
    }

    /// Atomically bump one engagement counter and return its new value.
    ///
    /// Returns `None` if the bill does not exist.
    pub async fn increment(
        pool: &PgPool,
        id: DbId,
        counter: EngagementCounter,
    ) -> Result<Option<i32>, sqlx::Error> {
        let col = counter.column();
        let query = format!("UPDATE bills SET {col} = {col} + 1 WHERE id = $1 RETURNING {col}");
        sqlx::query_scalar::<_, i32>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Bill readings
// ---------------------------------------------------------------------------

pub struct BillReadingRepo;

impl BillReadingRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "bill_readings",
        columns: READING_COLUMNS,
        search_columns: &["details"],
        ordering_fields: &["date", "created_at"],
        default_ordering: &["date"],
        page_size: 20,
    };

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<BillReading>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    /// All readings of a bill in date order.
    pub async fn list_for_bill(pool: &PgPool, bill_id: DbId) -> Result<Vec<BillReading>, sqlx::Error> {
        let query = format!(
            "SELECT {READING_COLUMNS} FROM bill_readings WHERE bill_id = $1 ORDER BY date, id"
        );
        sqlx::query_as::<_, BillReading>(&query)
            .bind(bill_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BillReading>, sqlx::Error> {
        let query = format!("SELECT {READING_COLUMNS} FROM bill_readings WHERE id = $1");
        sqlx::query_as::<_, BillReading>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a reading. A second reading for the same `(bill_id, stage)`
    /// violates `uq_bill_readings_bill_stage`.
    pub async fn create(pool: &PgPool, dto: &CreateBillReading) -> Result<BillReading, sqlx::Error> {
        let query = format!(
            "INSERT INTO bill_readings \
                 (bill_id, stage, date, details, document, committee_report, analysis, mp_photo) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {READING_COLUMNS}"
        );
        sqlx::query_as::<_, BillReading>(&query)
            .bind(dto.bill_id)
            .bind(&dto.stage)
            .bind(dto.date)
            .bind(&dto.details)
            .bind(&dto.document)
            .bind(&dto.committee_report)
            .bind(&dto.analysis)
            .bind(&dto.mp_photo)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateBillReading,
    ) -> Result<Option<BillReading>, sqlx::Error> {
        let query = format!(
            "UPDATE bill_readings SET \
                 stage = COALESCE($2, stage), \
                 date = COALESCE($3, date), \
                 details = COALESCE($4, details), \
                 document = CASE WHEN $5 THEN $6 ELSE document END, \
                 committee_report = CASE WHEN $7 THEN $8 ELSE committee_report END, \
                 analysis = CASE WHEN $9 THEN $10 ELSE analysis END, \
                 mp_photo = CASE WHEN $11 THEN $12 ELSE mp_photo END \
             WHERE id = $1 \
             RETURNING {READING_COLUMNS}"
        );
        sqlx::query_as::<_, BillReading>(&query)
            .bind(id)
            .bind(&dto.stage)
            .bind(dto.date)
            .bind(&dto.details)
            .bind(dto.document.is_some())
            .bind(dto.document.as_ref().and_then(|v| v.as_deref()))
            .bind(dto.committee_report.is_some())
            .bind(dto.committee_report.as_ref().and_then(|v| v.as_deref()))
            .bind(dto.analysis.is_some())
            .bind(dto.analysis.as_ref().and_then(|v| v.as_deref()))
            .bind(dto.mp_photo.is_some())
            .bind(dto.mp_photo.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, "bill_readings", id).await
    }
}

// ---------------------------------------------------------------------------
// MPs
// ---------------------------------------------------------------------------

pub struct MpRepo;

impl MpRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "mps",
        columns: MP_COLUMNS,
        search_columns: &["name", "constituency", "district", "party"],
        ordering_fields: &["name", "constituency"],
        default_ordering: &["name"],
        page_size: 20,
    };

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<Mp>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Mp>, sqlx::Error> {
        let query = format!("SELECT {MP_COLUMNS} FROM mps WHERE id = $1");
        sqlx::query_as::<_, Mp>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Compact rows for the given ids, ordered by name. Unknown ids are
    /// silently absent.
    pub async fn summaries(pool: &PgPool, ids: &[DbId]) -> Result<Vec<MpSummary>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, MpSummary>(
            "SELECT id, name, constituency, party, photo FROM mps \
             WHERE id = ANY($1) ORDER BY name, id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    pub async fn create(pool: &PgPool, dto: &CreateMp) -> Result<Mp, sqlx::Error> {
        let query = format!(
            "INSERT INTO mps \
                 (name, constituency, district, party, photo, email, phone, bio, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {MP_COLUMNS}"
        );
        sqlx::query_as::<_, Mp>(&query)
            .bind(&dto.name)
            .bind(dto.constituency.as_deref().unwrap_or(""))
            .bind(dto.district.as_deref().unwrap_or(""))
            .bind(dto.party.as_deref().unwrap_or(""))
            .bind(&dto.photo)
            .bind(dto.email.as_deref().unwrap_or(""))
            .bind(dto.phone.as_deref().unwrap_or(""))
            .bind(dto.bio.as_deref().unwrap_or(""))
            .bind(dto.is_active.unwrap_or(true))
            .fetch_one(pool)
            .await
    }

    pub async fn update(pool: &PgPool, id: DbId, dto: &UpdateMp) -> Result<Option<Mp>, sqlx::Error> {
        let query = format!(
            "UPDATE mps SET \
                 name = COALESCE($2, name), \
                 constituency = COALESCE($3, constituency), \
                 district = COALESCE($4, district), \
                 party = COALESCE($5, party), \
                 photo = CASE WHEN $6 THEN $7 ELSE photo END, \
                 email = COALESCE($8, email), \
                 phone = COALESCE($9, phone), \
                 bio = COALESCE($10, bio), \
                 is_active = COALESCE($11, is_active) \
             WHERE id = $1 \
             RETURNING {MP_COLUMNS}"
        );
        sqlx::query_as::<_, Mp>(&query)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.constituency)
            .bind(&dto.district)
            .bind(&dto.party)
            .bind(dto.photo.is_some())
            .bind(dto.photo.as_ref().and_then(|v| v.as_deref()))
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(&dto.bio)
            .bind(dto.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete an MP. Committee chair/deputy references are nulled and
    /// memberships removed by the foreign keys.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, "mps", id).await
    }
}

// ---------------------------------------------------------------------------
// Committees
// ---------------------------------------------------------------------------

pub struct CommitteeRepo;

impl CommitteeRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "committees",
        columns: COMMITTEE_COLUMNS,
        search_columns: &["name", "committee_type", "description"],
        ordering_fields: &["name", "begin_date", "created_at"],
        default_ordering: &["name"],
        page_size: 20,
    };

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<Committee>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Committee>, sqlx::Error> {
        Self::fetch(pool, id).await
    }

    async fn fetch<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Committee>, sqlx::Error> {
        let query = format!("SELECT {COMMITTEE_COLUMNS} FROM committees WHERE id = $1");
        sqlx::query_as::<_, Committee>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Insert a committee and its memberships in one transaction.
    pub async fn create(pool: &PgPool, dto: &CreateCommittee) -> Result<Committee, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO committees \
                 (name, committee_type, description, chair_id, deputy_chair_id, \
                  begin_date, end_date, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(&dto.name)
        .bind(dto.committee_type.as_deref().unwrap_or(""))
        .bind(dto.description.as_deref().unwrap_or(""))
        .bind(dto.chair_id)
        .bind(dto.deputy_chair_id)
        .bind(dto.begin_date)
        .bind(dto.end_date)
        .bind(dto.is_active.unwrap_or(true))
        .fetch_one(&mut *tx)
        .await?;

        Self::replace_members(&mut tx, id, &dto.member_ids).await?;
        let committee = Self::fetch(&mut *tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;
        Ok(committee)
    }

    /// Partially update a committee. When `member_ids` is present the
    /// membership set is replaced wholesale.
    ///
    /// Chair, deputy chair and term dates are `Option<Option<_>>`: an
    /// explicit `null` clears the column, an absent field keeps it.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateCommittee,
    ) -> Result<Option<Committee>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE committees SET \
                 name = COALESCE($2, name), \
                 committee_type = COALESCE($3, committee_type), \
                 description = COALESCE($4, description), \
                 chair_id = CASE WHEN $5 THEN $6 ELSE chair_id END, \
                 deputy_chair_id = CASE WHEN $7 THEN $8 ELSE deputy_chair_id END, \
                 begin_date = CASE WHEN $9 THEN $10 ELSE begin_date END, \
                 end_date = CASE WHEN $11 THEN $12 ELSE end_date END, \
                 is_active = COALESCE($13, is_active) \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.committee_type)
        .bind(&dto.description)
        .bind(dto.chair_id.is_some())
        .bind(dto.chair_id.flatten())
        .bind(dto.deputy_chair_id.is_some())
        .bind(dto.deputy_chair_id.flatten())
        .bind(dto.begin_date.is_some())
        .bind(dto.begin_date.flatten())
        .bind(dto.end_date.is_some())
        .bind(dto.end_date.flatten())
        .bind(dto.is_active)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Ok(None);
        }
        if let Some(member_ids) = &dto.member_ids {
            Self::replace_members(&mut tx, id, member_ids).await?;
        }
        let committee = Self::fetch(&mut *tx, id).await?;

        tx.commit().await?;
        Ok(committee)
    }

    async fn replace_members(
        tx: &mut Transaction<'_, Postgres>,
        committee_id: DbId,
        mp_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM committee_members WHERE committee_id = $1")
            .bind(committee_id)
            .execute(&mut **tx)
            .await?;
        if mp_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO committee_members (committee_id, mp_id) \
             SELECT $1, UNNEST($2::BIGINT[]) \
             ON CONFLICT ON CONSTRAINT uq_committee_members_committee_mp DO NOTHING",
        )
        .bind(committee_id)
        .bind(mp_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, "committees", id).await
    }
}

// ---------------------------------------------------------------------------
// Hansards and order papers
// ---------------------------------------------------------------------------

pub struct SittingDocumentRepo;

impl SittingDocumentRepo {
    fn list_spec(kind: SittingDocumentKind) -> ListSpec {
        ListSpec {
            table: kind.table(),
            columns: SITTING_COLUMNS,
            search_columns: &["title", "description"],
            ordering_fields: &["sitting_date", "created_at"],
            default_ordering: &["-sitting_date"],
            page_size: 20,
        }
    }

    pub async fn list(
        pool: &PgPool,
        kind: SittingDocumentKind,
        query: &ListQuery,
    ) -> Result<Page<SittingDocument>, sqlx::Error> {
        fetch_page(pool, &Self::list_spec(kind), query).await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        kind: SittingDocumentKind,
        id: DbId,
    ) -> Result<Option<SittingDocument>, sqlx::Error> {
        let query = format!("SELECT {SITTING_COLUMNS} FROM {} WHERE id = $1", kind.table());
        sqlx::query_as::<_, SittingDocument>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        kind: SittingDocumentKind,
        dto: &CreateSittingDocument,
    ) -> Result<SittingDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (title, sitting_date, description, file, date_received) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {SITTING_COLUMNS}",
            kind.table()
        );
        sqlx::query_as::<_, SittingDocument>(&query)
            .bind(&dto.title)
            .bind(dto.sitting_date)
            .bind(dto.description.as_deref().unwrap_or(""))
            .bind(&dto.file)
            .bind(dto.date_received)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        kind: SittingDocumentKind,
        id: DbId,
        dto: &UpdateSittingDocument,
    ) -> Result<Option<SittingDocument>, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET \
                 title = COALESCE($2, title), \
                 sitting_date = COALESCE($3, sitting_date), \
                 description = COALESCE($4, description), \
                 file = COALESCE($5, file), \
                 date_received = CASE WHEN $6 THEN $7 ELSE date_received END \
             WHERE id = $1 \
             RETURNING {SITTING_COLUMNS}",
            kind.table()
        );
        sqlx::query_as::<_, SittingDocument>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(dto.sitting_date)
            .bind(&dto.description)
            .bind(&dto.file)
            .bind(dto.date_received.is_some())
            .bind(dto.date_received.flatten())
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(
        pool: &PgPool,
        kind: SittingDocumentKind,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, kind.table(), id).await
    }
}
