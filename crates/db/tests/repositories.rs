//! Integration tests for the repository layer and the generic list builder.
//!
//! - Slug generation and collisions
//! - Published/draft filtering, search, ordering and pagination
//! - Bill readings uniqueness and cascade
//! - Committee memberships, MP deletion and clearing nullable fields
//! - Engagement counters
//! - Resource kind scoping
//! - Chat conversations

use assert_matches::assert_matches;
use chrono::NaiveDate;
use pwatch_core::choices::ResourceKind;
use pwatch_db::listing::ListQuery;
use pwatch_db::models::article::{ArticleKind, CreateArticle};
use pwatch_db::models::chatbot::NewChatMessage;
use pwatch_db::models::resource::CreateResourceDocument;
use pwatch_db::models::tracker::{
    CreateBill, CreateBillReading, CreateCommittee, CreateMp, EngagementCounter, UpdateCommittee,
};
use pwatch_db::repositories::{
    ArticleRepo, BillReadingRepo, BillRepo, CommitteeRepo, ConversationRepo, MpRepo,
    ResourceRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_article(title: &str, status: &str, published: NaiveDate) -> CreateArticle {
    CreateArticle {
        title: title.to_string(),
        slug: None,
        author: "Civic Desk".to_string(),
        category: None,
        excerpt: Some(format!("About {title}")),
        content: format!("Body of {title}"),
        image: None,
        status: Some(status.to_string()),
        published_date: Some(published),
    }
}

fn new_bill(title: &str) -> CreateBill {
    CreateBill {
        title: title.to_string(),
        bill_type: "government".to_string(),
        year_introduced: date(2025, 2, 1),
        mover: "Minister of Finance".to_string(),
        assigned_to: "Budget Committee".to_string(),
        status: None,
        description: None,
        video_url: None,
    }
}

fn new_reading(bill_id: i64, stage: &str, on: NaiveDate) -> CreateBillReading {
    CreateBillReading {
        bill_id,
        stage: stage.to_string(),
        date: on,
        details: format!("{stage} debate"),
        document: None,
        committee_report: None,
        analysis: None,
        mp_photo: None,
    }
}

fn new_mp(name: &str, party: &str) -> CreateMp {
    CreateMp {
        name: name.to_string(),
        constituency: Some(format!("{name} County")),
        district: Some("Kampala".to_string()),
        party: Some(party.to_string()),
        photo: None,
        email: None,
        phone: None,
        bio: None,
        is_active: None,
    }
}

fn constraint_of(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.constraint().map(str::to_string),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_auto_slug_gets_numeric_suffix(pool: PgPool) {
    let dto = new_article("Budget 2025: What's New?", "published", date(2025, 6, 1));

    let first = ArticleRepo::create(&pool, ArticleKind::Blog, &dto).await.unwrap();
    let second = ArticleRepo::create(&pool, ArticleKind::Blog, &dto).await.unwrap();
    let third = ArticleRepo::create(&pool, ArticleKind::Blog, &dto).await.unwrap();

    assert_eq!(first.slug, "budget-2025-whats-new");
    assert_eq!(second.slug, "budget-2025-whats-new-2");
    assert_eq!(third.slug, "budget-2025-whats-new-3");
    assert_eq!(first.category, "governance");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_explicit_duplicate_slug_violates_unique(pool: PgPool) {
    let mut dto = new_article("Oversight", "draft", date(2025, 1, 1));
    dto.slug = Some("oversight".to_string());
    ArticleRepo::create(&pool, ArticleKind::News, &dto).await.unwrap();

    let err = ArticleRepo::create(&pool, ArticleKind::News, &dto)
        .await
        .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some("uq_news_slug"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_blog_and_news_slugs_are_independent(pool: PgPool) {
    let dto = new_article("Same Title", "published", date(2025, 1, 1));
    let blog = ArticleRepo::create(&pool, ArticleKind::Blog, &dto).await.unwrap();
    let news = ArticleRepo::create(&pool, ArticleKind::News, &dto).await.unwrap();

    assert_eq!(blog.slug, news.slug);
    assert_eq!(news.category, "news_updates");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_status_filter_and_default_ordering(pool: PgPool) {
    for (title, status, day) in [
        ("Older", "published", 1),
        ("Newest", "published", 20),
        ("Hidden", "draft", 25),
    ] {
        ArticleRepo::create(&pool, ArticleKind::Blog, &new_article(title, status, date(2025, 3, day)))
            .await
            .unwrap();
    }

    let query = ListQuery::default().filter("status", "published");
    let page = ArticleRepo::list(&pool, ArticleKind::Blog, &query).await.unwrap();

    let titles: Vec<&str> = page.items.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, ["Newest", "Older"]);
    assert_eq!(page.info.count, 2);
    assert_eq!(page.info.page_size, 12);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_requires_every_term(pool: PgPool) {
    for title in ["Budget oversight", "Budget speech", "Health oversight"] {
        ArticleRepo::create(&pool, ArticleKind::Blog, &new_article(title, "published", date(2025, 1, 1)))
            .await
            .unwrap();
    }

    let query = ListQuery {
        search: Some("budget OVERSIGHT".to_string()),
        ..Default::default()
    };
    let page = ArticleRepo::list(&pool, ArticleKind::Blog, &query).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Budget oversight");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_escapes_wildcards(pool: PgPool) {
    for title in ["100% turnout", "100 MPs present"] {
        ArticleRepo::create(&pool, ArticleKind::Blog, &new_article(title, "published", date(2025, 1, 1)))
            .await
            .unwrap();
    }

    let query = ListQuery {
        search: Some("100%".to_string()),
        ..Default::default()
    };
    let page = ArticleRepo::list(&pool, ArticleKind::Blog, &query).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "100% turnout");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pagination_past_end_is_empty(pool: PgPool) {
    for i in 0..3 {
        ArticleRepo::create(
            &pool,
            ArticleKind::News,
            &new_article(&format!("Item {i}"), "published", date(2025, 1, 1 + i)),
        )
        .await
        .unwrap();
    }

    let query = ListQuery {
        page: Some(2),
        page_size: Some(2),
        ordering: Some("title".to_string()),
        ..Default::default()
    };
    let page = ArticleRepo::list(&pool, ArticleKind::News, &query).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Item 2");
    assert_eq!(page.info.total_pages, 2);

    let beyond = ListQuery {
        page: Some(9),
        ..query
    };
    let page = ArticleRepo::list(&pool, ArticleKind::News, &beyond).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.info.count, 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_latest_published_skips_drafts(pool: PgPool) {
    for (title, status, day) in [
        ("A", "published", 1),
        ("B", "published", 2),
        ("C", "draft", 3),
        ("D", "published", 4),
        ("E", "published", 5),
    ] {
        ArticleRepo::create(&pool, ArticleKind::Blog, &new_article(title, status, date(2025, 4, day)))
            .await
            .unwrap();
    }

    let latest = ArticleRepo::latest_published(&pool, ArticleKind::Blog, 3).await.unwrap();
    let titles: Vec<&str> = latest.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, ["E", "D", "B"]);
}

// ---------------------------------------------------------------------------
// Bills and readings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_reading_stage_unique_per_bill(pool: PgPool) {
    let bill = BillRepo::create(&pool, &new_bill("Finance Bill")).await.unwrap();
    assert_eq!(bill.status, "1st_reading");

    BillReadingRepo::create(&pool, &new_reading(bill.id, "1st_reading", date(2025, 2, 3)))
        .await
        .unwrap();
    let err = BillReadingRepo::create(&pool, &new_reading(bill.id, "1st_reading", date(2025, 2, 4)))
        .await
        .unwrap_err();
    assert_eq!(
        constraint_of(&err).as_deref(),
        Some("uq_bill_readings_bill_stage")
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_readings_ordered_by_date_and_cascade(pool: PgPool) {
    let bill = BillRepo::create(&pool, &new_bill("Data Bill")).await.unwrap();
    BillReadingRepo::create(&pool, &new_reading(bill.id, "2nd_reading", date(2025, 5, 1)))
        .await
        .unwrap();
    BillReadingRepo::create(&pool, &new_reading(bill.id, "1st_reading", date(2025, 3, 1)))
        .await
        .unwrap();

    let readings = BillReadingRepo::list_for_bill(&pool, bill.id).await.unwrap();
    let stages: Vec<&str> = readings.iter().map(|r| r.stage.as_str()).collect();
    assert_eq!(stages, ["1st_reading", "2nd_reading"]);

    assert!(BillRepo::delete(&pool, bill.id).await.unwrap());
    let left = BillReadingRepo::list_for_bill(&pool, bill.id).await.unwrap();
    assert!(left.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_engagement_increment(pool: PgPool) {
    let bill = BillRepo::create(&pool, &new_bill("Roads Bill")).await.unwrap();

    let first = BillRepo::increment(&pool, bill.id, EngagementCounter::Likes).await.unwrap();
    let second = BillRepo::increment(&pool, bill.id, EngagementCounter::Likes).await.unwrap();
    let shares = BillRepo::increment(&pool, bill.id, EngagementCounter::Shares).await.unwrap();

    assert_eq!(first, Some(1));
    assert_eq!(second, Some(2));
    assert_eq!(shares, Some(1));
    assert_eq!(
        BillRepo::increment(&pool, 999_999, EngagementCounter::Comments).await.unwrap(),
        None
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reading_for_missing_bill_is_fk_violation(pool: PgPool) {
    let err = BillReadingRepo::create(&pool, &new_reading(424_242, "1st_reading", date(2025, 1, 1)))
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23503"));
}

// ---------------------------------------------------------------------------
// Committees
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_committee_members_and_mp_deletion(pool: PgPool) {
    let chair = MpRepo::create(&pool, &new_mp("Akello", "NRM")).await.unwrap();
    let deputy = MpRepo::create(&pool, &new_mp("Byaruhanga", "NUP")).await.unwrap();
    let member = MpRepo::create(&pool, &new_mp("Chelangat", "FDC")).await.unwrap();

    let committee = CommitteeRepo::create(
        &pool,
        &CreateCommittee {
            name: "Budget Committee".to_string(),
            committee_type: Some("Standing".to_string()),
            description: None,
            chair_id: Some(chair.id),
            deputy_chair_id: Some(deputy.id),
            member_ids: vec![member.id, chair.id],
            begin_date: Some(date(2021, 6, 1)),
            end_date: Some(date(2026, 5, 31)),
            is_active: None,
        },
    )
    .await
    .unwrap();

    let mut expected = vec![chair.id, member.id];
    expected.sort();
    assert_eq!(committee.member_ids, expected);

    MpRepo::delete(&pool, chair.id).await.unwrap();
    let after = CommitteeRepo::find_by_id(&pool, committee.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.chair_id, None);
    assert_eq!(after.deputy_chair_id, Some(deputy.id));
    assert_eq!(after.member_ids, vec![member.id]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_committee_update_replaces_members(pool: PgPool) {
    let a = MpRepo::create(&pool, &new_mp("Atim", "NRM")).await.unwrap();
    let b = MpRepo::create(&pool, &new_mp("Baguma", "NRM")).await.unwrap();

    let committee = CommitteeRepo::create(
        &pool,
        &CreateCommittee {
            name: "Health".to_string(),
            committee_type: None,
            description: None,
            chair_id: None,
            deputy_chair_id: None,
            member_ids: vec![a.id],
            begin_date: None,
            end_date: None,
            is_active: None,
        },
    )
    .await
    .unwrap();

    let updated = CommitteeRepo::update(
        &pool,
        committee.id,
        &UpdateCommittee {
            name: None,
            committee_type: None,
            description: None,
            chair_id: None,
            deputy_chair_id: None,
            member_ids: Some(vec![b.id]),
            begin_date: None,
            end_date: None,
            is_active: Some(false),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.member_ids, vec![b.id]);
    assert!(!updated.is_active);
    assert_eq!(updated.name, "Health");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_committee_update_clears_chair_and_term_end(pool: PgPool) {
    let chair = MpRepo::create(&pool, &new_mp("Chelimo", "NRM")).await.unwrap();
    let deputy = MpRepo::create(&pool, &new_mp("Driwaru", "FDC")).await.unwrap();

    let committee = CommitteeRepo::create(
        &pool,
        &CreateCommittee {
            name: "Public Accounts".to_string(),
            committee_type: None,
            description: None,
            chair_id: Some(chair.id),
            deputy_chair_id: Some(deputy.id),
            member_ids: vec![],
            begin_date: Some(date(2021, 5, 1)),
            end_date: Some(date(2026, 5, 1)),
            is_active: None,
        },
    )
    .await
    .unwrap();

    // `Some(None)` clears a column; `None` leaves it alone.
    let updated = CommitteeRepo::update(
        &pool,
        committee.id,
        &UpdateCommittee {
            name: None,
            committee_type: None,
            description: None,
            chair_id: Some(None),
            deputy_chair_id: None,
            member_ids: None,
            begin_date: None,
            end_date: Some(None),
            is_active: None,
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.chair_id, None);
    assert_eq!(updated.deputy_chair_id, Some(deputy.id));
    assert_eq!(updated.begin_date, Some(date(2021, 5, 1)));
    assert_eq!(updated.end_date, None);
}

#[test]
fn update_committee_distinguishes_null_from_absent() {
    let dto: UpdateCommittee =
        serde_json::from_value(serde_json::json!({ "chair_id": null, "end_date": "2026-05-01" }))
            .unwrap();
    assert_eq!(dto.chair_id, Some(None));
    assert_eq!(dto.deputy_chair_id, None);
    assert_eq!(dto.end_date, Some(Some(date(2026, 5, 1))));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_committee_term_check(pool: PgPool) {
    let err = CommitteeRepo::create(
        &pool,
        &CreateCommittee {
            name: "Backwards".to_string(),
            committee_type: None,
            description: None,
            chair_id: None,
            deputy_chair_id: None,
            member_ids: vec![],
            begin_date: Some(date(2025, 6, 1)),
            end_date: Some(date(2025, 1, 1)),
            is_active: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some("ck_committees_term"));
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_resource_kinds_are_scoped(pool: PgPool) {
    let report = ResourceRepo::create(
        &pool,
        ResourceKind::Report,
        &CreateResourceDocument {
            name: "Budget brief".to_string(),
            description: None,
            file: "resources/brief.pdf".to_string(),
        },
    )
    .await
    .unwrap();

    let explainers = ResourceRepo::list(&pool, ResourceKind::Explainer, ListQuery::default())
        .await
        .unwrap();
    assert!(explainers.items.is_empty());

    let reports = ResourceRepo::list(&pool, ResourceKind::Report, ListQuery::default())
        .await
        .unwrap();
    assert_eq!(reports.items.len(), 1);
    assert_eq!(reports.info.page_size, 15);

    assert!(ResourceRepo::find_by_id(&pool, ResourceKind::Statement, report.id)
        .await
        .unwrap()
        .is_none());
    assert!(!ResourceRepo::delete(&pool, ResourceKind::Statement, report.id)
        .await
        .unwrap());
}

// ---------------------------------------------------------------------------
// Conversations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_conversation_get_or_create_is_idempotent(pool: PgPool) {
    let first = ConversationRepo::get_or_create(&pool, "sess-1", Some("10.0.0.1"), "curl")
        .await
        .unwrap();
    let again = ConversationRepo::get_or_create(&pool, "sess-1", None, "other")
        .await
        .unwrap();
    assert_eq!(first.id, again.id);
    assert_eq!(again.ip_address.as_deref(), Some("10.0.0.1"));

    ConversationRepo::append_exchange(
        &pool,
        first.id,
        &NewChatMessage {
            role: "user",
            content: "What passed?",
            document_name: "",
            document_url: "",
        },
        &NewChatMessage {
            role: "assistant",
            content: "The Finance Bill.",
            document_name: "Hansard",
            document_url: "https://example.org/media/h.pdf",
        },
    )
    .await
    .unwrap();

    let messages = ConversationRepo::messages(&pool, first.id).await.unwrap();
    let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, ["user", "assistant"]);

    let listed = ConversationRepo::list(&pool, &ListQuery::default()).await.unwrap();
    assert_eq!(listed.items[0].message_count, 2);
}
