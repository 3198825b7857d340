//! Route definitions for `/multimedia`.

use axum::routing::get;
use axum::Router;

use crate::handlers::multimedia;
use crate::state::AppState;

/// Routes mounted at `/multimedia`.
///
/// ```text
/// GET, POST          /x-spaces
/// GET, PUT, DELETE   /x-spaces/{id}
/// GET, POST          /podcasts
/// GET, PUT, DELETE   /podcasts/{id}
/// GET, POST          /gallery
/// GET, PUT, DELETE   /gallery/{id}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/x-spaces",
            get(multimedia::list_x_spaces).post(multimedia::create_x_space),
        )
        .route(
            "/x-spaces/{id}",
            get(multimedia::get_x_space)
                .put(multimedia::update_x_space)
                .delete(multimedia::delete_x_space),
        )
        .route(
            "/podcasts",
            get(multimedia::list_podcasts).post(multimedia::create_podcast),
        )
        .route(
            "/podcasts/{id}",
            get(multimedia::get_podcast)
                .put(multimedia::update_podcast)
                .delete(multimedia::delete_podcast),
        )
        .route(
            "/gallery",
            get(multimedia::list_gallery).post(multimedia::create_gallery_image),
        )
        .route(
            "/gallery/{id}",
            get(multimedia::get_gallery_image)
                .put(multimedia::update_gallery_image)
                .delete(multimedia::delete_gallery_image),
        )
}
