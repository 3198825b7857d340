//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

use pwatch_core::types::DbId;
use sqlx::PgPool;

pub mod about_repo;
pub mod article_repo;
pub mod chatbot_repo;
pub mod contact_repo;
pub mod home_repo;
pub mod multimedia_repo;
pub mod resource_repo;
pub mod tracker_repo;
pub mod user_repo;

pub use about_repo::{HighlightRepo, HighlightTable, OurStoryRepo, PartnerRepo, TeamMemberRepo, WhoWeAreRepo};
pub use article_repo::ArticleRepo;
pub use chatbot_repo::{ChatbotDocumentRepo, ConversationRepo};
pub use contact_repo::{ContactRepo, DonationRepo};
pub use home_repo::{HeadlineRepo, HeroImageRepo};
pub use multimedia_repo::{GalleryRepo, PodcastRepo, XSpaceRepo};
pub use resource_repo::ResourceRepo;
pub use tracker_repo::{BillReadingRepo, BillRepo, CommitteeRepo, MpRepo, SittingDocumentRepo};
pub use user_repo::UserRepo;

/// Delete one row by primary key. Returns `true` if a row was deleted.
///
/// `table` must be a compile-time table name, never request input.
pub(crate) async fn delete_by_id(
    pool: &PgPool,
    table: &'static str,
    id: DbId,
) -> Result<bool, sqlx::Error> {
    let query = format!("DELETE FROM {table} WHERE id = $1");
    let result = sqlx::query(&query).bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}
