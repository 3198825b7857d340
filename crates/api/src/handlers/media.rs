//! Staff file uploads into the media root.
//!
//! The returned relative path is what content rows store in their file and
//! image columns; the same files are served back under `MEDIA_URL`.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Folders an upload may be placed in, relative to the media root.
pub const UPLOAD_FOLDERS: &[&str] = &[
    "team",
    "hero",
    "blogs",
    "news",
    "x_spaces",
    "podcasts",
    "gallery",
    "partners",
    "about",
    "resources",
    "bill_documents",
    "committee_reports",
    "bill_analysis",
    "mp_photos",
    "hansards",
    "order_papers",
    "chatbot/documents",
];

/// Folder used when the form omits one.
const DEFAULT_FOLDER: &str = "uploads";

#[derive(Debug, Serialize)]
pub struct UploadedFile {
    /// Path relative to the media root.
    pub path: String,
    pub url: Option<String>,
}

/// POST /api/v1/media/upload
///
/// Multipart fields: `file` (required) and `folder` (optional, one of
/// [`UPLOAD_FOLDERS`]).
pub async fn upload(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut file_data: Option<(String, Vec<u8>)> = None;
    let mut folder: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field.bytes().await?;
                file_data = Some((filename, data.to_vec()));
            }
            "folder" => {
                folder = Some(field.text().await?.trim().to_string());
            }
            _ => {}
        }
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    let folder = resolve_folder(folder.as_deref())?;

    let stored_name = format!("{}_{}", uuid::Uuid::new_v4().simple(), sanitize_filename(&filename));
    let relative_path = format!("{folder}/{stored_name}");

    let dir = state.config.media.root.join(folder);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create media folder: {e}")))?;
    tokio::fs::write(dir.join(&stored_name), &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    tracing::info!(
        path = %relative_path,
        size = data.len(),
        user_id = admin.user_id,
        "Media file uploaded",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadedFile {
                url: state.media.absolute(&relative_path),
                path: relative_path,
            },
        }),
    ))
}

/// Check the requested folder against the allow-list.
fn resolve_folder(requested: Option<&str>) -> Result<&'static str, AppError> {
    match requested.filter(|f| !f.is_empty()) {
        None => Ok(DEFAULT_FOLDER),
        Some(f) => UPLOAD_FOLDERS
            .iter()
            .copied()
            .find(|allowed| *allowed == f.trim_matches('/'))
            .ok_or_else(|| AppError::BadRequest(format!("Unknown upload folder '{f}'"))),
    }
}

/// Reduce a client-supplied file name to a safe single path segment.
///
/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
/// Directory components and leading dots are dropped.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn sanitize_strips_directories_and_odd_characters() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\docs\\Budget Speech 2025.pdf"), "Budget_Speech_2025.pdf");
        assert_eq!(sanitize_filename(".env"), "env");
        assert_eq!(sanitize_filename("..."), "upload");
    }

    #[test]
    fn folder_must_be_allowed() {
        assert_eq!(resolve_folder(None).unwrap(), "uploads");
        assert_eq!(resolve_folder(Some("hansards")).unwrap(), "hansards");
        assert_eq!(resolve_folder(Some("chatbot/documents/")).unwrap(), "chatbot/documents");
        assert_matches!(resolve_folder(Some("../secrets")), Err(AppError::BadRequest(_)));
    }
}
