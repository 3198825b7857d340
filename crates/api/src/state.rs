use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use pwatch_core::media::MediaUrlBuilder;
use pwatch_db::models::article::{ArticleKind, ArticleSummary};
use pwatch_llm::CompletionClient;

use crate::config::ServerConfig;

/// How long a home-page summary stays cached.
pub const SUMMARY_TTL: Duration = Duration::from_secs(600);

/// Cached "latest three" article cards, one entry per article kind.
pub type SummaryCache = Cache<ArticleKind, Arc<Vec<ArticleSummary>>>;

/// Shared application state available to all handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pwatch_db::DbPool,
    /// Server configuration (wrapped in `Arc` for cheap cloning).
    pub config: Arc<ServerConfig>,
    /// Turns stored media paths into absolute URLs.
    pub media: Arc<MediaUrlBuilder>,
    /// Home-page blog and news summaries.
    pub summaries: SummaryCache,
    /// Language model used by the chatbot; `None` when no API key is set.
    pub llm: Option<Arc<dyn CompletionClient>>,
}

impl AppState {
    /// Assemble state from its parts, deriving the media URL builder from
    /// the configuration.
    pub fn new(
        pool: pwatch_db::DbPool,
        config: ServerConfig,
        llm: Option<Arc<dyn CompletionClient>>,
    ) -> Self {
        let media = MediaUrlBuilder::new(
            config.media.full_media_url.clone(),
            config.debug,
            config.media.backend_domain.clone(),
            config.media.url.clone(),
        );
        Self {
            pool,
            config: Arc::new(config),
            media: Arc::new(media),
            summaries: Cache::builder()
                .max_capacity(8)
                .time_to_live(SUMMARY_TTL)
                .build(),
            llm,
        }
    }
}
