//! Route definitions for `/trackers`.

use axum::routing::{get, post};
use axum::{Extension, Router};
use pwatch_db::models::tracker::SittingDocumentKind;

use crate::handlers::trackers;
use crate::state::AppState;

/// Routes mounted at `/trackers`.
///
/// ```text
/// GET, POST          /bills
/// GET, PUT, DELETE   /bills/{id}
/// POST               /bills/{id}/like | /comment | /share   (public)
/// GET, POST          /readings
/// GET, PUT, DELETE   /readings/{id}
/// GET, POST          /mps
/// GET, PUT, DELETE   /mps/{id}
/// GET, POST          /committees
/// GET, PUT, DELETE   /committees/{id}
/// /hansards[/{id}], /order-papers[/{id}]
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bills", get(trackers::list_bills).post(trackers::create_bill))
        .route(
            "/bills/{id}",
            get(trackers::get_bill)
                .put(trackers::update_bill)
                .delete(trackers::delete_bill),
        )
        .route("/bills/{id}/like", post(trackers::like_bill))
        .route("/bills/{id}/comment", post(trackers::comment_bill))
        .route("/bills/{id}/share", post(trackers::share_bill))
        .route(
            "/readings",
            get(trackers::list_readings).post(trackers::create_reading),
        )
        .route(
            "/readings/{id}",
            get(trackers::get_reading)
                .put(trackers::update_reading)
                .delete(trackers::delete_reading),
        )
        .route("/mps", get(trackers::list_mps).post(trackers::create_mp))
        .route(
            "/mps/{id}",
            get(trackers::get_mp)
                .put(trackers::update_mp)
                .delete(trackers::delete_mp),
        )
        .route(
            "/committees",
            get(trackers::list_committees).post(trackers::create_committee),
        )
        .route(
            "/committees/{id}",
            get(trackers::get_committee)
                .put(trackers::update_committee)
                .delete(trackers::delete_committee),
        )
        .nest("/hansards", sitting_documents(SittingDocumentKind::Hansard))
        .nest(
            "/order-papers",
            sitting_documents(SittingDocumentKind::OrderPaper),
        )
}

fn sitting_documents(kind: SittingDocumentKind) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(trackers::list_sitting_documents).post(trackers::create_sitting_document),
        )
        .route(
            "/{id}",
            get(trackers::get_sitting_document)
                .put(trackers::update_sitting_document)
                .delete(trackers::delete_sitting_document),
        )
        .layer(Extension(kind))
}
