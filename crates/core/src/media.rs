//! Absolute media URL construction.
//!
//! File and image columns store paths relative to the media root
//! (`blogs/cover.jpg`). Responses expose absolute backend URLs so the
//! frontend, which is served from a different origin, can load them
//! directly.

/// Builds absolute URLs for files stored under the media root.
#[derive(Debug, Clone)]
pub struct MediaUrlBuilder {
    full_media_url: Option<String>,
    debug: bool,
    backend_domain: String,
    media_url: String,
}

impl MediaUrlBuilder {
    /// * `full_media_url` - explicit absolute base (`FULL_MEDIA_URL`), wins when set.
    /// * `debug` - use `http://localhost:8000` as the fallback host.
    /// * `backend_domain` - production fallback host (`BACKEND_DOMAIN`).
    /// * `media_url` - URL prefix media is served under (`MEDIA_URL`, e.g. `/media/`).
    pub fn new(
        full_media_url: Option<String>,
        debug: bool,
        backend_domain: impl Into<String>,
        media_url: impl Into<String>,
    ) -> Self {
        Self {
            full_media_url: full_media_url
                .map(|u| u.trim_end_matches('/').to_string())
                .filter(|u| !u.is_empty()),
            debug,
            backend_domain: backend_domain.into().trim_end_matches('/').to_string(),
            media_url: normalize_prefix(&media_url.into()),
        }
    }

    /// Convert a stored relative path into an absolute URL.
    ///
    /// Returns `None` for an empty path. Values that are already absolute
    /// `http(s)` URLs are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use pwatch_core::media::MediaUrlBuilder;
    /// let media = MediaUrlBuilder::new(Some("https://cdn.example.org/media/".into()), false, "https://api.example.org", "/media/");
    /// assert_eq!(media.absolute("/media/news/a.jpg").as_deref(), Some("https://cdn.example.org/media/news/a.jpg"));
    /// assert_eq!(media.absolute(""), None);
    /// ```
    pub fn absolute(&self, relative: &str) -> Option<String> {
        if relative.is_empty() {
            return None;
        }
        if relative.starts_with("http://") || relative.starts_with("https://") {
            return Some(relative.to_string());
        }

        let rel = relative
            .strip_prefix("/media/")
            .or_else(|| relative.strip_prefix("media/"))
            .unwrap_or(relative)
            .trim_start_matches('/');

        if let Some(base) = &self.full_media_url {
            return Some(format!("{base}/{rel}"));
        }

        let host = if self.debug {
            "http://localhost:8000"
        } else {
            self.backend_domain.as_str()
        };
        Some(format!("{host}{}{rel}", self.media_url))
    }

    /// Rewrite an optional stored path in place.
    pub fn rewrite(&self, field: &mut Option<String>) {
        *field = field.as_deref().and_then(|rel| self.absolute(rel));
    }

    /// Rewrite a required stored path in place, leaving empty strings as-is.
    pub fn rewrite_required(&self, field: &mut String) {
        if let Some(url) = self.absolute(field) {
            *field = url;
        }
    }
}

/// Ensure the URL prefix starts and ends with `/`.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// Implemented by response models that carry file or image paths.
pub trait MediaFields {
    /// Replace every stored relative path with its absolute URL.
    fn absolutize(&mut self, media: &MediaUrlBuilder);
}

impl<T: MediaFields> MediaFields for Vec<T> {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        for item in self.iter_mut() {
            item.absolutize(media);
        }
    }
}

impl<T: MediaFields> MediaFields for Option<T> {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        if let Some(item) = self {
            item.absolutize(media);
        }
    }
}
