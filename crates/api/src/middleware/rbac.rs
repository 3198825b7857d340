//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the requirement, so authorization is enforced at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pwatch_core::error::CoreError;
use pwatch_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 401 without a token and 403 for
/// any other role.
///
/// ```ignore
/// async fn create(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Staff user if a valid admin token was sent, `None` for anonymous callers.
///
/// Public endpoints use this to show drafts and inactive rows to staff. An
/// invalid token is still rejected so stale sessions surface as 401 instead
/// of silently falling back to the public view.
pub struct OptionalAdmin(pub Option<AuthUser>);

impl OptionalAdmin {
    pub fn is_staff(&self) -> bool {
        self.0.is_some()
    }
}

impl FromRequestParts<AppState> for OptionalAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_headers(parts, state)?;
        Ok(OptionalAdmin(user.filter(|u| u.role == ROLE_ADMIN)))
    }
}
