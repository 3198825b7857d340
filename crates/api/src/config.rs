use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Default production host used to build media URLs when neither
/// `FULL_MEDIA_URL` nor debug mode apply.
const DEFAULT_BACKEND_DOMAIN: &str = "https://pwatch-backend-production.up.railway.app";

/// Default model for chatbot completions.
const DEFAULT_CHATBOT_MODEL: &str = "claude-3-haiku-20240307";

const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds. Chatbot queries make two model calls,
    /// so this must leave room for both.
    pub request_timeout_secs: u64,
    /// Development mode; only affects the media URL fallback host.
    pub debug: bool,
    pub media: MediaConfig,
    pub jwt: JwtConfig,
    pub chatbot: ChatbotConfig,
    /// Staff account created at startup when the users table is empty.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Where uploaded files live and how they are addressed.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub root: PathBuf,
    /// URL prefix the media directory is served under, e.g. `/media/`.
    pub url: String,
    pub full_media_url: Option<String>,
    pub backend_domain: String,
}

#[derive(Debug, Clone)]
pub struct ChatbotConfig {
    /// `None` disables question answering; greetings still work.
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// | Env Var                | Default                                  |
    /// |------------------------|------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                |
    /// | `PORT`                 | `8000`                                   |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`                  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                     |
    /// | `DEBUG`                | `false`                                  |
    /// | `MEDIA_ROOT`           | `media`                                  |
    /// | `MEDIA_URL`            | `/media/`                                |
    /// | `FULL_MEDIA_URL`       | unset                                    |
    /// | `BACKEND_DOMAIN`       | production Railway domain                |
    /// | `CLAUDE_API_KEY`       | unset                                    |
    /// | `CHATBOT_MODEL`        | `claude-3-haiku-20240307`                |
    /// | `ANTHROPIC_API_URL`    | `https://api.anthropic.com`              |
    /// | `ADMIN_USERNAME`, `ADMIN_EMAIL`, `ADMIN_PASSWORD` | unset         |
    ///
    /// JWT settings are loaded by [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let debug = std::env::var("DEBUG")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let media = MediaConfig {
            root: std::env::var("MEDIA_ROOT")
                .unwrap_or_else(|_| "media".into())
                .into(),
            url: std::env::var("MEDIA_URL").unwrap_or_else(|_| "/media/".into()),
            full_media_url: non_empty_var("FULL_MEDIA_URL"),
            backend_domain: std::env::var("BACKEND_DOMAIN")
                .unwrap_or_else(|_| DEFAULT_BACKEND_DOMAIN.into()),
        };

        let chatbot = ChatbotConfig {
            api_key: non_empty_var("CLAUDE_API_KEY"),
            model: std::env::var("CHATBOT_MODEL").unwrap_or_else(|_| DEFAULT_CHATBOT_MODEL.into()),
            api_url: std::env::var("ANTHROPIC_API_URL")
                .unwrap_or_else(|_| DEFAULT_ANTHROPIC_API_URL.into()),
        };

        let bootstrap_admin = match (
            non_empty_var("ADMIN_USERNAME"),
            non_empty_var("ADMIN_PASSWORD"),
        ) {
            (Some(username), Some(password)) => Some(BootstrapAdmin {
                email: std::env::var("ADMIN_EMAIL").unwrap_or_default(),
                username,
                password,
            }),
            _ => None,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            debug,
            media,
            jwt: JwtConfig::from_env(),
            chatbot,
            bootstrap_admin,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
