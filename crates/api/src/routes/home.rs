//! Route definitions for `/home`.

use axum::routing::get;
use axum::Router;

use crate::handlers::home;
use crate::state::AppState;

/// Routes mounted at `/home`.
///
/// ```text
/// GET, POST          /hero-images
/// GET, PUT, DELETE   /hero-images/{id}
/// GET, POST          /headlines
/// GET, PUT, DELETE   /headlines/{id}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/hero-images",
            get(home::list_hero_images).post(home::create_hero_image),
        )
        .route(
            "/hero-images/{id}",
            get(home::get_hero_image)
                .put(home::update_hero_image)
                .delete(home::delete_hero_image),
        )
        .route(
            "/headlines",
            get(home::list_headlines).post(home::create_headline),
        )
        .route(
            "/headlines/{id}",
            get(home::get_headline)
                .put(home::update_headline)
                .delete(home::delete_headline),
        )
}
