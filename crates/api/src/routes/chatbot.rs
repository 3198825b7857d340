//! Route definitions for `/chatbot`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::chatbot;
use crate::state::AppState;

/// Routes mounted at `/chatbot`.
///
/// ```text
/// GET, POST          /documents
/// GET, PUT, DELETE   /documents/{id}
/// POST               /query                          (public)
/// GET                /conversations                  (admin)
/// GET                /conversations/{session_id}     (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/documents",
            get(chatbot::list_documents).post(chatbot::create_document),
        )
        .route(
            "/documents/{id}",
            get(chatbot::get_document)
                .put(chatbot::update_document)
                .delete(chatbot::delete_document),
        )
        .route("/query", post(chatbot::query))
        .route("/conversations", get(chatbot::list_conversations))
        .route(
            "/conversations/{session_id}",
            get(chatbot::get_conversation),
        )
}
