//! Discovery and text extraction of the PDFs the chatbot answers from.
//!
//! Every PDF under the media root is a candidate, whatever folder it was
//! uploaded to. Nothing is cached: the folder is rescanned per question so
//! new uploads are picked up immediately.

use std::path::{Path, PathBuf};

use pwatch_core::chatbot::document_display_name;
use pwatch_core::media::MediaUrlBuilder;

use crate::error::AppError;

/// A PDF found under the media root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFile {
    pub path: PathBuf,
    /// Path relative to the media root, `/`-separated.
    pub relative_path: String,
    pub file_name: String,
}

/// A PDF with its extracted text, ready for the answer pipeline.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub name: String,
    pub url: String,
    pub text: String,
}

/// Recursively collect `*.pdf` files (extension matched case-insensitively),
/// sorted by relative path.
///
/// A missing media root yields an empty list.
pub async fn scan_pdfs(root: &Path) -> Result<Vec<PdfFile>, AppError> {
    let mut files = Vec::new();
    if tokio::fs::metadata(root).await.is_err() {
        return Ok(files);
    }
    scan_recursive(root, root, &mut files).await?;
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(files)
}

async fn scan_recursive(root: &Path, current: &Path, files: &mut Vec<PdfFile>) -> Result<(), AppError> {
    let mut entries = tokio::fs::read_dir(current)
        .await
        .map_err(|e| AppError::Chatbot(format!("Failed to read directory: {e}")))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::Chatbot(format!("Failed to read entry: {e}")))?
    {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| AppError::Chatbot(format!("Failed to read metadata: {e}")))?;

        if file_type.is_dir() {
            Box::pin(scan_recursive(root, &path, files)).await?;
            continue;
        }

        if !is_pdf(&path) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(&path);
        let relative_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        files.push(PdfFile {
            file_name: entry.file_name().to_string_lossy().to_string(),
            relative_path,
            path,
        });
    }

    Ok(())
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Extract the text of one PDF.
///
/// Returns `None` when the file cannot be read or parsed, or holds no text.
/// The PDF parser can panic on malformed input, so the call is isolated.
pub fn extract_text(path: &Path) -> Option<String> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read PDF");
            return None;
        }
    };

    let parsed = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes));
    match parsed {
        Ok(Ok(text)) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Ok(Err(e)) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to extract PDF text");
            None
        }
        Err(_) => {
            tracing::warn!(path = %path.display(), "PDF parser panicked");
            None
        }
    }
}

/// Scan the media root and load every readable PDF.
///
/// # Errors
///
/// - [`AppError::NotFound`] when there are no PDFs at all, or none of them
///   yields any text.
pub async fn load_documents(root: &Path, media: &MediaUrlBuilder) -> Result<Vec<LoadedDocument>, AppError> {
    let files = scan_pdfs(root).await?;
    if files.is_empty() {
        return Err(AppError::NotFound("No PDF documents found in media folder".into()));
    }

    let total = files.len();
    let extracted = tokio::task::spawn_blocking(move || {
        files
            .into_iter()
            .filter_map(|file| extract_text(&file.path).map(|text| (file, text)))
            .collect::<Vec<_>>()
    })
    .await
    .map_err(|e| AppError::Chatbot(format!("PDF extraction task failed: {e}")))?;

    if extracted.is_empty() {
        return Err(AppError::NotFound("No readable text found in documents".into()));
    }

    tracing::debug!(total, readable = extracted.len(), "Loaded chatbot documents");

    Ok(extracted
        .into_iter()
        .map(|(file, text)| LoadedDocument {
            name: document_display_name(&file.file_name),
            url: media.absolute(&file.relative_path).unwrap_or_default(),
            text,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn scan_finds_nested_pdfs_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("hansards/2025")).unwrap();
        std::fs::write(dir.path().join("hansards/2025/sitting_one.PDF"), b"x").unwrap();
        std::fs::write(dir.path().join("order-paper.pdf"), b"x").unwrap();
        std::fs::write(dir.path().join("photo.jpg"), b"x").unwrap();

        let files = scan_pdfs(dir.path()).await.unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["hansards/2025/sitting_one.PDF", "order-paper.pdf"]);
    }

    #[tokio::test]
    async fn missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files = scan_pdfs(&dir.path().join("nope")).await.unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn no_pdfs_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let media = MediaUrlBuilder::new(None, true, "https://api.example.org", "/media/");
        let err = load_documents(dir.path(), &media).await.unwrap_err();
        assert_matches!(err, AppError::NotFound(msg) if msg == "No PDF documents found in media folder");
    }

    #[tokio::test]
    async fn unreadable_pdfs_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.pdf"), b"not a pdf").unwrap();
        let media = MediaUrlBuilder::new(None, true, "https://api.example.org", "/media/");
        let err = load_documents(dir.path(), &media).await.unwrap_err();
        assert_matches!(err, AppError::NotFound(msg) if msg == "No readable text found in documents");
    }
}
