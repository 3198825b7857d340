//! Route definitions for `/contact`.

use axum::routing::get;
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes mounted at `/contact`.
///
/// ```text
/// POST               /submissions        (public)
/// GET                /submissions        (admin)
/// GET, PUT, DELETE   /submissions/{id}   (admin)
/// POST               /donations          (public)
/// GET                /donations          (admin)
/// GET, PUT, DELETE   /donations/{id}     (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/submissions",
            get(contact::list_contact).post(contact::submit_contact),
        )
        .route(
            "/submissions/{id}",
            get(contact::get_contact)
                .put(contact::update_contact_status)
                .delete(contact::delete_contact),
        )
        .route(
            "/donations",
            get(contact::list_donations).post(contact::submit_donation),
        )
        .route(
            "/donations/{id}",
            get(contact::get_donation)
                .put(contact::update_donation_status)
                .delete(contact::delete_donation),
        )
}
