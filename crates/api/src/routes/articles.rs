//! Route definitions for `/blog` and `/news`.

use axum::routing::get;
use axum::{Extension, Router};
use pwatch_db::models::article::ArticleKind;

use crate::handlers::articles;
use crate::state::AppState;

/// Routes for one article kind, mounted at `/blog` or `/news`.
///
/// ```text
/// GET    /               -> list_articles (public: published only)
/// POST   /               -> create_article (admin)
/// GET    /home-summary   -> home_summary (latest 3, cached)
/// GET    /{slug}         -> get_article
/// PUT    /{slug}         -> update_article (admin)
/// DELETE /{slug}         -> delete_article (admin)
/// ```
pub fn router(kind: ArticleKind) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(articles::list_articles).post(articles::create_article),
        )
        .route("/home-summary", get(articles::home_summary))
        .route(
            "/{slug}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        .layer(Extension(kind))
}
