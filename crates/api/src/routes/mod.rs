pub mod about;
pub mod articles;
pub mod auth;
pub mod chatbot;
pub mod contact;
pub mod health;
pub mod home;
pub mod media;
pub mod multimedia;
pub mod resources;
pub mod trackers;

use axum::Router;
use pwatch_db::models::article::ArticleKind;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Reads are public unless noted; writes need a staff token.
///
/// ```text
/// /auth/login                                   login (public)
/// /auth/me                                      current staff user
///
/// /about/{objectives,team-members,who-we-are,
///         our-story,what-sets-us-apart,partners}[/{id}]
///
/// /blog[/{slug}], /blog/home-summary
/// /news[/{slug}], /news/home-summary
///
/// /home/{hero-images,headlines}[/{id}]
///
/// /multimedia/{x-spaces,podcasts,gallery}[/{id}]
///
/// /resources/{explainers,reports,
///             partner-publications,statements}[/{id}]
///
/// /trackers/bills[/{id}]
/// /trackers/bills/{id}/{like,comment,share}     engagement (public)
/// /trackers/{readings,mps,committees}[/{id}]
/// /trackers/{hansards,order-papers}[/{id}]
///
/// /contact/{submissions,donations}              submit (public), list (staff)
/// /contact/{submissions,donations}/{id}         staff only
///
/// /chatbot/documents[/{id}]
/// /chatbot/query                                ask a question (public)
/// /chatbot/conversations[/{session_id}]         staff only
///
/// /media/upload                                 multipart upload (staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/about", about::router())
        .nest("/blog", articles::router(ArticleKind::Blog))
        .nest("/news", articles::router(ArticleKind::News))
        .nest("/home", home::router())
        .nest("/multimedia", multimedia::router())
        .nest("/resources", resources::router())
        .nest("/trackers", trackers::router())
        .nest("/contact", contact::router())
        .nest("/chatbot", chatbot::router())
        .nest("/media", media::router())
}
