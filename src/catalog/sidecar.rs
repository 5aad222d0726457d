//! Sidecar JSON metadata reader.
//!
//! Each entry directory may carry one JSON descriptor file holding
//! display metadata. Fields are taken verbatim; nothing beyond the
//! JSON parse is validated. A missing or unparseable sidecar is "no
//! metadata", never a scan error.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::warn;
use vv_core::paths::is_sidecar_candidate;

/// Display metadata read from an entry directory's sidecar JSON.
///
/// Unknown fields are ignored; everything here is optional. A field
/// whose value has an unexpected type reads as absent; it never fails
/// the document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sidecar {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub year: Option<i32>,
    #[serde(deserialize_with = "lenient")]
    pub overview: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub genres: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub tags: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub admin_rating: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub user_rating: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub is_franchise: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub sample_file_path: Option<std::path::PathBuf>,
    #[serde(deserialize_with = "lenient")]
    pub total_number_of_episodes: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub no_seasons: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub completion_status: Option<String>,
}

/// Deserialize a field's value if it has the expected type, `None`
/// otherwise. Only the document-level JSON parse can fail.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

impl Sidecar {
    /// The trimmed title, if present and non-empty.
    pub fn titled(&self) -> Option<String> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
    }
}

/// Read the sidecar metadata of one directory.
///
/// The sidecar is the lexicographically smallest (case-insensitive)
/// non-hidden `*.json` filename, so the choice is deterministic when a
/// vault erroneously carries several. Returns `None` when there is no
/// candidate, the directory cannot be listed, or the file does not
/// parse; the latter two log a warning.
pub async fn read_sidecar(dir: &Path) -> Option<Sidecar> {
    let name = find_sidecar_name(dir).await?;
    let path = dir.join(&name);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read sidecar {}: {e}", path.display());
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(sidecar) => Some(sidecar),
        Err(e) => {
            warn!("Failed to parse sidecar {}: {e}", path.display());
            None
        }
    }
}

async fn find_sidecar_name(dir: &Path) -> Option<String> {
    let mut read_dir = match tokio::fs::read_dir(dir).await {
        Ok(rd) => rd,
        Err(e) => {
            warn!("Failed to list {}: {e}", dir.display());
            return None;
        }
    };

    let mut best: Option<String> = None;
    while let Ok(Some(entry)) = read_dir.next_entry().await {
        let name = entry.file_name().to_string_lossy().to_string();
        if !is_sidecar_candidate(&name) {
            continue;
        }
        let better = match &best {
            Some(current) => name.to_lowercase() < current.to_lowercase(),
            None => true,
        };
        if better {
            best = Some(name);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[tokio::test]
    async fn test_reads_sidecar_fields() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "meta.json",
            r#"{"title":"Inception","year":2010,"genres":["Sci-Fi"],"adminRating":"S","unknownField":true}"#,
        );

        let sidecar = read_sidecar(tmp.path()).await.unwrap();
        assert_eq!(sidecar.titled().as_deref(), Some("Inception"));
        assert_eq!(sidecar.year, Some(2010));
        assert_eq!(sidecar.genres, Some(vec!["Sci-Fi".to_string()]));
        assert_eq!(sidecar.admin_rating.as_deref(), Some("S"));
    }

    #[tokio::test]
    async fn test_mismatched_field_types_read_as_absent() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "meta.json",
            r#"{"title":"Inception","year":"2010","genres":"Sci-Fi","noSeasons":1,"overview":null}"#,
        );

        // Wrong-typed values cannot fail the document.
        let sidecar = read_sidecar(tmp.path()).await.unwrap();
        assert_eq!(sidecar.titled().as_deref(), Some("Inception"));
        assert!(sidecar.year.is_none());
        assert!(sidecar.genres.is_none());
        assert!(sidecar.no_seasons.is_none());
        assert!(sidecar.overview.is_none());
    }

    #[tokio::test]
    async fn test_no_candidate_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "poster.webp", "not json");
        write(tmp.path(), ".hidden.json", r#"{"title":"x"}"#);
        assert!(read_sidecar(tmp.path()).await.is_none());
    }

    #[tokio::test]
    async fn test_parse_failure_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "meta.json", "{ not json");
        assert!(read_sidecar(tmp.path()).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_object_has_no_title() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "meta.json", "{}");
        let sidecar = read_sidecar(tmp.path()).await.unwrap();
        assert!(sidecar.titled().is_none());
    }

    #[tokio::test]
    async fn test_blank_title_is_untitled() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "meta.json", r#"{"title":"   "}"#);
        let sidecar = read_sidecar(tmp.path()).await.unwrap();
        assert!(sidecar.titled().is_none());
    }

    #[tokio::test]
    async fn test_multiple_sidecars_pick_is_deterministic() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "b.json", r#"{"title":"FromB"}"#);
        write(tmp.path(), "A.json", r#"{"title":"FromA"}"#);
        // Case-insensitive lexicographic order: "A.json" wins over "b.json".
        let sidecar = read_sidecar(tmp.path()).await.unwrap();
        assert_eq!(sidecar.titled().as_deref(), Some("FromA"));
    }

    #[tokio::test]
    async fn test_missing_directory_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(read_sidecar(&tmp.path().join("nope")).await.is_none());
    }
}
