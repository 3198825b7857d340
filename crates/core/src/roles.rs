//! Well-known staff role names.
//!
//! Must match the values accepted by the `users.role` check constraint and
//! embedded in access-token claims.

/// Full staff access: content writes, submissions, conversation history.
pub const ROLE_ADMIN: &str = "admin";
