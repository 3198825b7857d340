//! Integration tests for the about, home, multimedia and resources pages.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, delete_auth, get, get_auth, post_json, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// About
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_public_lists_hide_inactive_rows(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    for (title, active) in [("Track bills", true), ("Old goal", false)] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/about/objectives",
            json!({ "title": title, "description": "d", "is_active": active }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(app.clone(), "/api/v1/about/objectives").await).await;
    assert_eq!(json["pagination"]["count"], 1);
    assert_eq!(json["data"][0]["title"], "Track bills");

    let json = body_json(get_auth(app.clone(), "/api/v1/about/objectives", &token).await).await;
    assert_eq!(json["pagination"]["count"], 2);

    let json = body_json(
        get_auth(app, "/api/v1/about/objectives?is_active=false", &token).await,
    )
    .await;
    assert_eq!(json["pagination"]["count"], 1);
    assert_eq!(json["data"][0]["title"], "Old goal");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_inactive_objective_is_hidden_from_public_retrieve(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/about/objectives",
            json!({ "title": "Old goal", "description": "d", "is_active": false }),
            &token,
        )
        .await,
    )
    .await;
    let uri = format!("/api/v1/about/objectives/{}", created["data"]["id"]);

    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["title"], "Old goal");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_highlight_tables_are_separate(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/about/what-sets-us-apart",
            json!({ "title": "Independent", "description": "Non-partisan" }),
            &token,
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let json = body_json(get(app.clone(), "/api/v1/about/objectives").await).await;
    assert_eq!(json["pagination"]["count"], 0);

    let response = get(app.clone(), &format!("/api/v1/about/objectives/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, &format!("/api/v1/about/what-sets-us-apart/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_team_member_email_is_validated(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/about/team-members",
        json!({ "name": "A. Okello", "title": "Director", "email": "not-an-email" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_writes_require_staff(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/about/partners",
        json!({ "name": "Civic Trust" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = delete(app, "/api/v1/about/partners/1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_partner_logo_is_absolute(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json_auth(
            app,
            "/api/v1/about/partners",
            json!({ "name": "Civic Trust", "logo": "partners/civic.png" }),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(
        created["data"]["logo"],
        "http://localhost:8000/media/partners/civic.png"
    );
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_headline_crud(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/home/headlines",
            json!({ "text": "Budget read today", "is_bold": true }),
            &token,
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["is_active"], true);

    let updated = body_json(
        put_json_auth(
            app.clone(),
            &format!("/api/v1/home/headlines/{id}"),
            json!({ "text": "Budget passed" }),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(updated["data"]["text"], "Budget passed");
    assert_eq!(updated["data"]["is_bold"], true);

    let response = delete_auth(app.clone(), &format!("/api/v1/home/headlines/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, &format!("/api/v1/home/headlines/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_inactive_headline_is_hidden_from_public_retrieve(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/home/headlines",
            json!({ "text": "Draft ticker", "is_active": false }),
            &token,
        )
        .await,
    )
    .await;
    let uri = format!("/api/v1/home/headlines/{}", created["data"]["id"]);

    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Reactivating makes it public again.
    put_json_auth(app.clone(), &uri, json!({ "is_active": true }), &token).await;
    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_hero_image_requires_image(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/home/hero-images",
        json!({ "title": "Parliament", "image": "" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Multimedia
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_x_space_status_is_checked(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let space = json!({
        "title": "Budget week",
        "host": "Parliament Watch",
        "scheduled_date": "2025-06-12T18:00:00Z",
        "x_space_url": "https://x.com/i/spaces/1",
        "status": "postponed",
    });
    let response = post_json_auth(app.clone(), "/api/v1/multimedia/x-spaces", space, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let space = json!({
        "title": "Budget week",
        "host": "Parliament Watch",
        "scheduled_date": "2025-06-12T18:00:00Z",
        "x_space_url": "https://x.com/i/spaces/1",
        "status": "live",
    });
    let created = body_json(
        post_json_auth(app.clone(), "/api/v1/multimedia/x-spaces", space, &token).await,
    )
    .await;
    assert_eq!(created["data"]["status_display"], "Live");

    let json = body_json(get(app, "/api/v1/multimedia/x-spaces?status=live").await).await;
    assert_eq!(json["pagination"]["count"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_gallery_featured_first(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    for (title, featured) in [("Plenary", false), ("Swearing in", true)] {
        post_json_auth(
            app.clone(),
            "/api/v1/multimedia/gallery",
            json!({ "title": title, "image": "gallery/a.jpg", "featured": featured }),
            &token,
        )
        .await;
    }

    let json = body_json(get(app.clone(), "/api/v1/multimedia/gallery").await).await;
    assert_eq!(json["data"][0]["title"], "Swearing in");

    let json = body_json(get(app, "/api/v1/multimedia/gallery?featured=false").await).await;
    assert_eq!(json["pagination"]["count"], 1);
    assert_eq!(json["data"][0]["title"], "Plenary");
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_resource_kinds_are_isolated(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/resources/explainers",
            json!({ "name": "How a bill becomes law", "file": "resources/bill.pdf" }),
            &token,
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(
        created["data"]["file"],
        "http://localhost:8000/media/resources/bill.pdf"
    );

    let json = body_json(get(app.clone(), "/api/v1/resources/explainers").await).await;
    assert_eq!(json["pagination"]["count"], 1);

    let json = body_json(get(app.clone(), "/api/v1/resources/statements").await).await;
    assert_eq!(json["pagination"]["count"], 0);

    let response = get(app.clone(), &format!("/api/v1/resources/reports/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, &format!("/api/v1/resources/reports/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
