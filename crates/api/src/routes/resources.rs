//! Route definitions for `/resources`.

use axum::routing::get;
use axum::{Extension, Router};
use pwatch_core::choices::ResourceKind;

use crate::handlers::resources;
use crate::state::AppState;

/// Routes mounted at `/resources`, one sub-tree per document kind.
///
/// ```text
/// /explainers[/{id}]
/// /reports[/{id}]
/// /partner-publications[/{id}]
/// /statements[/{id}]
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/explainers", documents(ResourceKind::Explainer))
        .nest("/reports", documents(ResourceKind::Report))
        .nest(
            "/partner-publications",
            documents(ResourceKind::PartnerPublication),
        )
        .nest("/statements", documents(ResourceKind::Statement))
}

fn documents(kind: ResourceKind) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(resources::list_documents).post(resources::create_document),
        )
        .route(
            "/{id}",
            get(resources::get_document)
                .put(resources::update_document)
                .delete(resources::delete_document),
        )
        .layer(Extension(kind))
}
