//! Integration tests for the blog and news endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

async fn create_post(
    app: axum::Router,
    base: &str,
    token: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let response = post_json_auth(app, base, body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_drafts_are_hidden_from_the_public(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    create_post(
        app.clone(),
        "/api/v1/blog",
        &token,
        json!({ "title": "Published post", "author": "Staff", "content": "c", "status": "published" }),
    )
    .await;
    let draft = create_post(
        app.clone(),
        "/api/v1/blog",
        &token,
        json!({ "title": "Draft post", "author": "Staff", "content": "c" }),
    )
    .await;
    assert_eq!(draft["data"]["status"], "draft");

    let json = body_json(get(app.clone(), "/api/v1/blog").await).await;
    assert_eq!(json["pagination"]["count"], 1);
    assert_eq!(json["data"][0]["title"], "Published post");
    assert!(json["data"][0].get("content").is_none(), "list uses the summary shape");

    // Asking for drafts anonymously still only returns published posts.
    let json = body_json(get(app.clone(), "/api/v1/blog?status=draft").await).await;
    assert_eq!(json["pagination"]["count"], 1);

    let json = body_json(get_auth(app.clone(), "/api/v1/blog?status=draft", &token).await).await;
    assert_eq!(json["pagination"]["count"], 1);
    assert_eq!(json["data"][0]["title"], "Draft post");

    // A single draft is still retrievable by slug.
    let response = get(app, "/api/v1/blog/draft-post").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_auto_slugs_get_numeric_suffixes(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let body = json!({ "title": "Budget 2025: What's in it?", "author": "Staff", "content": "c" });

    let first = create_post(app.clone(), "/api/v1/blog", &token, body.clone()).await;
    let second = create_post(app.clone(), "/api/v1/blog", &token, body.clone()).await;
    let third = create_post(app, "/api/v1/blog", &token, body).await;

    assert_eq!(first["data"]["slug"], "budget-2025-whats-in-it");
    assert_eq!(second["data"]["slug"], "budget-2025-whats-in-it-2");
    assert_eq!(third["data"]["slug"], "budget-2025-whats-in-it-3");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_explicit_duplicate_slug_conflicts(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let body = json!({ "title": "One", "slug": "fixed", "author": "Staff", "content": "c" });

    create_post(app.clone(), "/api/v1/news", &token, body.clone()).await;
    let response = post_json_auth(app, "/api/v1/news", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_blog_and_news_are_separate(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let news = create_post(
        app.clone(),
        "/api/v1/news",
        &token,
        json!({ "title": "Sitting resumes", "author": "Desk", "content": "c", "status": "published" }),
    )
    .await;
    assert_eq!(news["data"]["category"], "news_updates");
    assert_eq!(news["data"]["category_display"], "News and Updates");

    let response = get(app.clone(), "/api/v1/blog/sitting-resumes").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // A news-only category is rejected for blog posts.
    let response = post_json_auth(
        app,
        "/api/v1/blog",
        json!({ "title": "x", "author": "Staff", "content": "c", "category": "parliament" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_home_summary_is_cached_until_a_write(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    for i in 1..=4 {
        create_post(
            app.clone(),
            "/api/v1/blog",
            &token,
            json!({
                "title": format!("Post {i}"),
                "author": "Staff",
                "content": "c",
                "status": "published",
                "published_date": format!("2025-01-0{i}"),
            }),
        )
        .await;
    }

    let json = body_json(get(app.clone(), "/api/v1/blog/home-summary").await).await;
    let titles: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Post 4", "Post 3", "Post 2"]);

    // A direct database change is not visible while the cache is warm.
    sqlx::query("UPDATE blogs SET title = 'Edited behind the cache' WHERE slug = 'post-4'")
        .execute(&pool)
        .await
        .unwrap();
    let json = body_json(get(app.clone(), "/api/v1/blog/home-summary").await).await;
    assert_eq!(json["data"][0]["title"], "Post 4");

    // Any write through the API invalidates it.
    let response = put_json_auth(
        app.clone(),
        "/api/v1/blog/post-1",
        json!({ "excerpt": "touched" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(get(app, "/api/v1/blog/home-summary").await).await;
    assert_eq!(json["data"][0]["title"], "Edited behind the cache");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_by_slug(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    create_post(
        app.clone(),
        "/api/v1/news",
        &token,
        json!({ "title": "Short lived", "author": "Desk", "content": "c" }),
    )
    .await;

    let response = delete_auth(app.clone(), "/api/v1/news/short-lived", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, "/api/v1/news/short-lived", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
