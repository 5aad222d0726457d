//! The media catalog model.
//!
//! [`MediaEntry`] is the universal catalog record: one movie, show,
//! season, episode, or franchise member. Entries are assembled
//! incrementally from partial sources (sidecar JSON, video probe,
//! computed paths), so everything except `title` and `kind` is
//! optional. Fields serialize in camelCase to match the sidecar JSON
//! convention in the vault.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// MediaKind
// ---------------------------------------------------------------------------

/// The semantic kind of a catalog entry, inferred from the top-level
/// vault folder it was discovered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Unclassified (top-level folder other than Movies/Shows/Documentaries).
    #[default]
    All,
    Movie,
    Show,
    Documentary,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Movie => write!(f, "movie"),
            Self::Show => write!(f, "show"),
            Self::Documentary => write!(f, "documentary"),
        }
    }
}

// ---------------------------------------------------------------------------
// Quality
// ---------------------------------------------------------------------------

/// Resolution class derived from the probed video height.
///
/// Serializes as its pixel-height label (`"2160"`, `"1080"`, ...), with
/// `"Unknown"` for absent or sub-480 heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Quality {
    #[serde(rename = "4320")]
    Q4320,
    #[serde(rename = "3840")]
    Q3840,
    #[serde(rename = "2160")]
    Q2160,
    #[serde(rename = "1440")]
    Q1440,
    #[serde(rename = "1080")]
    Q1080,
    #[serde(rename = "720")]
    Q720,
    #[serde(rename = "480")]
    Q480,
    #[serde(rename = "Unknown")]
    #[default]
    Unknown,
}

impl Quality {
    /// Classify a video height in pixels using fixed thresholds.
    ///
    /// `None` and `0` are both "no height" and map to [`Quality::Unknown`].
    pub fn from_height(height: Option<u32>) -> Self {
        match height {
            None | Some(0) => Self::Unknown,
            Some(h) if h >= 7680 => Self::Q4320,
            Some(h) if h >= 3840 => Self::Q3840,
            Some(h) if h >= 2160 => Self::Q2160,
            Some(h) if h >= 1440 => Self::Q1440,
            Some(h) if h >= 1080 => Self::Q1080,
            Some(h) if h >= 720 => Self::Q720,
            Some(h) if h >= 480 => Self::Q480,
            Some(_) => Self::Unknown,
        }
    }

    /// The serialized label for this class (`"2160"`, `"Unknown"`, ...).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Q4320 => "4320",
            Self::Q3840 => "3840",
            Self::Q2160 => "2160",
            Self::Q1440 => "1440",
            Self::Q1080 => "1080",
            Self::Q720 => "720",
            Self::Q480 => "480",
            Self::Unknown => "Unknown",
        }
    }

    /// Human-facing display name (`"4K"`, `"1080p"`, ...).
    pub fn as_text(&self) -> &'static str {
        match self {
            Self::Q4320 => "8K",
            Self::Q3840 => "4K",
            Self::Q2160 => "2160p",
            Self::Q1440 => "2K",
            Self::Q1080 => "1080p",
            Self::Q720 => "720p",
            Self::Q480 => "480p",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// MediaEntry
// ---------------------------------------------------------------------------

/// One record in the media catalog.
///
/// Sidecar-sourced fields (`year`, `overview`, `genres`, ratings, ...)
/// are carried verbatim as permissive types; they are never validated
/// beyond the sidecar's JSON parse. Probe-derived fields (`quality`,
/// `runtime_seconds`, ...) are present only when a video probe
/// succeeded. `dir_path` is present whenever the entry has children to
/// enumerate lazily.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaEntry {
    /// Display name. Required; every other field is optional.
    pub title: String,
    pub kind: MediaKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_file_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_file_path: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audios: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<String>,

    /// True when a movie-kind folder holds sub-folders instead of a
    /// direct video: it is a multi-part series container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_series: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_franchise: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub franchise_number: Option<u32>,

    /// Source directory; present whenever the entry has children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir_path: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_number: Option<u32>,
    /// Dense 1..N position within the season.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_number: Option<u32>,
    /// Ordering key parsed from the episode filename prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_overall_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_episodes_obtained: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_number_of_episodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_seasons: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_status: Option<String>,
}

impl MediaEntry {
    /// Create a bare entry with the two required fields.
    pub fn new(title: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            title: title.into(),
            kind,
            ..Self::default()
        }
    }

    /// Case-insensitive title key used for catalog ordering.
    ///
    /// Lowercased byte order, not locale collation: identical input
    /// must order identically on every platform.
    pub fn title_sort_key(&self) -> String {
        self.title.to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// Seasons listing
// ---------------------------------------------------------------------------

/// One season of a show: the season's own entry plus its ordered episodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    /// Numeric prefix of the season folder; absent when unparseable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_number: Option<u32>,
    pub entry: MediaEntry,
    pub episodes: Vec<MediaEntry>,
}

/// Result of the seasons-and-episodes listing for one show.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonsListing {
    /// Running count of episode files found across all seasons.
    pub number_of_episodes_obtained: u32,
    pub seasons: Vec<Season>,
}

/// Format a runtime in seconds as `H:MM:SS` (or `M:SS` under an hour).
pub fn format_hhmmss(total_seconds: f64) -> String {
    let sec = total_seconds.max(0.0).floor() as u64;
    let h = sec / 3600;
    let m = (sec % 3600) / 60;
    let s = sec % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_thresholds() {
        assert_eq!(Quality::from_height(Some(7680)), Quality::Q4320);
        assert_eq!(Quality::from_height(Some(4320)), Quality::Q3840);
        assert_eq!(Quality::from_height(Some(3840)), Quality::Q3840);
        assert_eq!(Quality::from_height(Some(2160)), Quality::Q2160);
        assert_eq!(Quality::from_height(Some(1440)), Quality::Q1440);
        assert_eq!(Quality::from_height(Some(1080)), Quality::Q1080);
        assert_eq!(Quality::from_height(Some(720)), Quality::Q720);
        assert_eq!(Quality::from_height(Some(719)), Quality::Q480);
        assert_eq!(Quality::from_height(Some(480)), Quality::Q480);
        assert_eq!(Quality::from_height(Some(479)), Quality::Unknown);
        assert_eq!(Quality::from_height(Some(0)), Quality::Unknown);
        assert_eq!(Quality::from_height(None), Quality::Unknown);
    }

    #[test]
    fn test_quality_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&Quality::Q2160).unwrap(),
            "\"2160\""
        );
        assert_eq!(
            serde_json::to_string(&Quality::Unknown).unwrap(),
            "\"Unknown\""
        );
        let q: Quality = serde_json::from_str("\"1080\"").unwrap();
        assert_eq!(q, Quality::Q1080);
    }

    #[test]
    fn test_quality_text() {
        assert_eq!(Quality::Q4320.as_text(), "8K");
        assert_eq!(Quality::Q3840.as_text(), "4K");
        assert_eq!(Quality::Q1080.as_text(), "1080p");
        assert_eq!(Quality::Unknown.as_text(), "Unknown");
    }

    #[test]
    fn test_entry_serializes_camel_case_without_absent_fields() {
        let mut entry = MediaEntry::new("Inception", MediaKind::Movie);
        entry.year = Some(2010);
        entry.video_file_path = Some(PathBuf::from("/vault/Inception.mkv"));

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["title"], "Inception");
        assert_eq!(json["kind"], "movie");
        assert_eq!(json["year"], 2010);
        assert_eq!(json["videoFilePath"], "/vault/Inception.mkv");
        assert!(json.get("posterPath").is_none());
        assert!(json.get("seasonNumber").is_none());
    }

    #[test]
    fn test_format_hhmmss() {
        assert_eq!(format_hhmmss(0.0), "0:00");
        assert_eq!(format_hhmmss(59.9), "0:59");
        assert_eq!(format_hhmmss(61.0), "1:01");
        assert_eq!(format_hhmmss(3600.0), "1:00:00");
        assert_eq!(format_hhmmss(5025.0), "1:23:45");
        assert_eq!(format_hhmmss(-5.0), "0:00");
    }
}
