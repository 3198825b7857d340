//! First-run staff account creation.

use pwatch_core::error::CoreError;
use pwatch_core::roles::ROLE_ADMIN;
use pwatch_core::types::DbId;
use pwatch_db::models::user::CreateUser;
use pwatch_db::repositories::UserRepo;
use pwatch_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::config::BootstrapAdmin;
use crate::error::AppError;

/// Create the configured admin account when the users table is empty.
///
/// Returns the new user's id, or `None` when staff accounts already exist.
#[tracing::instrument(skip_all, fields(username = %admin.username))]
pub async fn ensure_admin(pool: &DbPool, admin: &BootstrapAdmin) -> Result<Option<DbId>, AppError> {
    if UserRepo::count(pool).await? > 0 {
        return Ok(None);
    }

    validate_password_strength(&admin.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Failed to hash admin password: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Bootstrap admin account created");
    Ok(Some(user.id))
}
