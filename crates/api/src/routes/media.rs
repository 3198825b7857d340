//! Route definitions for `/media`.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes mounted at `/media`.
///
/// ```text
/// POST /upload   -> upload (admin, multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(media::upload))
        .layer(DefaultBodyLimit::max(media::MAX_UPLOAD_BYTES))
}
