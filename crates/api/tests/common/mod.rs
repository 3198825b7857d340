#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use pwatch_api::auth::jwt::{generate_access_token, JwtConfig};
use pwatch_api::auth::password::hash_password;
use pwatch_api::config::{ChatbotConfig, MediaConfig, ServerConfig};
use pwatch_api::router::build_app_router;
use pwatch_api::state::AppState;
use pwatch_core::roles::ROLE_ADMIN;
use pwatch_db::models::user::CreateUser;
use pwatch_db::repositories::UserRepo;
use pwatch_llm::{CompletionClient, CompletionRequest, LlmError};

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hs256";

/// Build a test `ServerConfig` with safe defaults and the given media root.
pub fn test_config(media_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        debug: true,
        media: MediaConfig {
            root: media_root.to_path_buf(),
            url: "/media/".to_string(),
            full_media_url: None,
            backend_domain: "https://api.example.org".to_string(),
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
        chatbot: ChatbotConfig {
            api_key: None,
            model: "test-model".to_string(),
            api_url: "http://127.0.0.1:9".to_string(),
        },
        bootstrap_admin: None,
    }
}

/// A media root that never exists, for tests that do not touch files.
fn empty_media_root() -> PathBuf {
    std::env::temp_dir().join("pwatch-api-tests-no-media")
}

/// Build the full application router (same middleware stack as the binary)
/// with no language model configured.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, None, &empty_media_root())
}

/// Build the application with an optional language model and media root.
pub fn build_test_app_with(
    pool: PgPool,
    llm: Option<Arc<dyn CompletionClient>>,
    media_root: &Path,
) -> Router {
    let config = test_config(media_root);
    let state = AppState::new(pool, config.clone(), llm);
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Staff accounts
// ---------------------------------------------------------------------------

pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

/// Insert a staff user and return a valid bearer token for it.
pub async fn admin_token(pool: &PgPool) -> String {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: "editor".to_string(),
            email: "editor@example.org".to_string(),
            password_hash: hash_password(ADMIN_PASSWORD).expect("hashing should succeed"),
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await
    .expect("user creation should succeed");

    let config = test_config(&empty_media_root());
    generate_access_token(user.id, &user.role, &config.jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

/// POST with extra request headers (used for client metadata).
pub async fn post_json_with_headers(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    headers: &[(&str, &str)],
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Send a raw request (multipart uploads, custom headers).
pub async fn send_request(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Language model stub
// ---------------------------------------------------------------------------

/// Replays canned completions in order and counts calls.
#[derive(Default)]
pub struct StubLlm {
    replies: Mutex<VecDeque<String>>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl StubLlm {
    pub fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl CompletionClient for StubLlm {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::ApiError {
                status: 529,
                body: "overloaded".to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A single-page PDF showing `text` in Helvetica, with a valid xref table.
pub fn minimal_pdf(text: &str) -> Vec<u8> {
    let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
         /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_start = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.extend_from_slice(xref.as_bytes());
    pdf
}
