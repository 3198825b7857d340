//! Request extractors shared by the handlers.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires a staff (`admin`) token.
//! - [`rbac::OptionalAdmin`] -- Widens public listings when a staff token is present.
//! - [`client::ClientMeta`] -- Caller IP and user agent for stored submissions.

pub mod auth;
pub mod client;
pub mod rbac;
