//! Poster loading with process-lifetime memoization.
//!
//! Posters are returned as `data:` URLs ready for embedding. The cache
//! is keyed by absolute path, unbounded, and never invalidated: the
//! vault is read-only from this system's perspective during a session.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use dashmap::DashMap;
use tracing::debug;

/// Memoizing poster loader.
///
/// Safe to share across tasks; concurrent reads of disjoint paths
/// insert independently, and the first writer of a path wins.
#[derive(Debug, Default)]
pub struct PosterCache {
    cache: DashMap<PathBuf, Arc<str>>,
}

impl PosterCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read an image file as an embeddable `data:` URL.
    ///
    /// Returns the cached value when present; otherwise reads the file,
    /// caches, and returns it. Any read failure yields `None` and is
    /// never an error to the caller.
    pub async fn read(&self, path: &Path) -> Option<Arc<str>> {
        if let Some(hit) = self.cache.get(path) {
            return Some(hit.clone());
        }

        let data = match tokio::fs::read(path).await {
            Ok(data) => data,
            Err(e) => {
                debug!("Failed to read poster {}: {e}", path.display());
                return None;
            }
        };

        let url: Arc<str> = Arc::from(data_url(path, &data));
        let stored = self
            .cache
            .entry(path.to_path_buf())
            .or_insert(url)
            .clone();
        Some(stored)
    }

    /// Number of cached posters.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Infer the embed mime type from the file extension.
fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("webp") => "image/webp",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

fn data_url(path: &Path, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime_for(path), STANDARD.encode(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_inference() {
        assert_eq!(mime_for(Path::new("poster.webp")), "image/webp");
        assert_eq!(mime_for(Path::new("poster.PNG")), "image/png");
        assert_eq!(mime_for(Path::new("poster.jpg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("poster.jpeg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("poster.bmp")), "application/octet-stream");
        assert_eq!(mime_for(Path::new("poster")), "application/octet-stream");
    }

    #[test]
    fn test_data_url_shape() {
        let url = data_url(Path::new("p.webp"), b"abc");
        assert_eq!(url, format!("data:image/webp;base64,{}", STANDARD.encode(b"abc")));
    }
}
