pub mod about;
pub mod articles;
pub mod auth;
pub mod chatbot;
pub mod contact;
pub mod home;
pub mod media;
pub mod multimedia;
pub mod resources;
pub mod trackers;

use pwatch_db::listing::ListQuery;

use crate::middleware::rbac::OptionalAdmin;

/// Restrict a content-block listing to active rows for the public.
///
/// Staff see every row and may filter on `is_active` themselves.
pub(crate) fn scope_active(
    query: ListQuery,
    staff: &OptionalAdmin,
    requested: Option<bool>,
) -> ListQuery {
    if staff.is_staff() {
        query.filter_opt("is_active", requested)
    } else {
        query.filter("is_active", true)
    }
}

/// Whether a single content block may be shown to the caller.
///
/// Inactive rows are hidden from the public, so retrieving one by id is a
/// 404 unless the caller is staff.
pub(crate) fn visible_to(is_active: bool, staff: &OptionalAdmin) -> bool {
    is_active || staff.is_staff()
}
