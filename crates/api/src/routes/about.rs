//! Route definitions for the `/about` content blocks.

use axum::routing::get;
use axum::{Extension, Router};
use pwatch_db::repositories::HighlightTable;

use crate::handlers::about;
use crate::state::AppState;

/// Routes mounted at `/about`.
///
/// Every resource exposes the same shape:
///
/// ```text
/// GET    /{resource}         -> list (public: active rows only)
/// POST   /{resource}         -> create (admin)
/// GET    /{resource}/{id}    -> get
/// PUT    /{resource}/{id}    -> update (admin)
/// DELETE /{resource}/{id}    -> delete (admin)
/// ```
///
/// Resources: objectives, team-members, who-we-are, our-story,
/// what-sets-us-apart, partners.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/objectives", highlights(HighlightTable::Objectives))
        .nest("/what-sets-us-apart", highlights(HighlightTable::WhatSetsUsApart))
        .route(
            "/team-members",
            get(about::list_team_members).post(about::create_team_member),
        )
        .route(
            "/team-members/{id}",
            get(about::get_team_member)
                .put(about::update_team_member)
                .delete(about::delete_team_member),
        )
        .route(
            "/who-we-are",
            get(about::list_who_we_are).post(about::create_who_we_are),
        )
        .route(
            "/who-we-are/{id}",
            get(about::get_who_we_are)
                .put(about::update_who_we_are)
                .delete(about::delete_who_we_are),
        )
        .route(
            "/our-story",
            get(about::list_our_story).post(about::create_our_story),
        )
        .route(
            "/our-story/{id}",
            get(about::get_our_story)
                .put(about::update_our_story)
                .delete(about::delete_our_story),
        )
        .route(
            "/partners",
            get(about::list_partners).post(about::create_partner),
        )
        .route(
            "/partners/{id}",
            get(about::get_partner)
                .put(about::update_partner)
                .delete(about::delete_partner),
        )
}

/// Objectives and "what sets us apart" share handlers; the table is pinned
/// per mount.
fn highlights(table: HighlightTable) -> Router<AppState> {
    Router::new()
        .route("/", get(about::list_highlights).post(about::create_highlight))
        .route(
            "/{id}",
            get(about::get_highlight)
                .put(about::update_highlight)
                .delete(about::delete_highlight),
        )
        .layer(Extension(table))
}
