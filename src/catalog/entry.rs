//! Typed construction of [`MediaEntry`] records.
//!
//! Entries are built field-by-field from named optional sources with a
//! fixed precedence: sidecar JSON fields first, then probe-derived
//! fields, then computed path fields. Later sources override earlier
//! ones.

use std::path::{Path, PathBuf};

use vv_core::{MediaEntry, MediaKind};
use vv_probe::MediaInfo;

use super::sidecar::Sidecar;

/// Builder assembling one catalog entry from its partial sources.
#[derive(Debug, Clone)]
pub struct EntryBuilder {
    entry: MediaEntry,
}

impl EntryBuilder {
    /// Start an entry with the two required fields. The initial title
    /// is the weakest source; a sidecar title overrides it.
    pub fn new(title: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            entry: MediaEntry::new(title, kind),
        }
    }

    /// Apply sidecar metadata. Absent sidecar fields leave the entry
    /// untouched; a present, non-empty title replaces the initial one.
    pub fn sidecar(mut self, sidecar: &Sidecar) -> Self {
        if let Some(title) = sidecar.titled() {
            self.entry.title = title;
        }
        self.entry.year = sidecar.year.or(self.entry.year);
        self.entry.overview = sidecar.overview.clone().or(self.entry.overview.take());
        self.entry.genres = sidecar.genres.clone().or(self.entry.genres.take());
        self.entry.tags = sidecar.tags.clone().or(self.entry.tags.take());
        self.entry.admin_rating = sidecar
            .admin_rating
            .clone()
            .or(self.entry.admin_rating.take());
        self.entry.user_rating = sidecar.user_rating.clone().or(self.entry.user_rating.take());
        self.entry.is_franchise = sidecar.is_franchise.or(self.entry.is_franchise);
        self.entry.sample_file_path = sidecar
            .sample_file_path
            .clone()
            .or(self.entry.sample_file_path.take());
        self.entry.total_number_of_episodes = sidecar
            .total_number_of_episodes
            .or(self.entry.total_number_of_episodes);
        self.entry.no_seasons = sidecar.no_seasons.or(self.entry.no_seasons);
        self.entry.completion_status = sidecar
            .completion_status
            .clone()
            .or(self.entry.completion_status.take());
        self
    }

    /// Apply a successful probe: playable path plus technical fields.
    pub fn probe(mut self, info: &MediaInfo) -> Self {
        self.entry.video_file_path = Some(info.file_path.clone());
        self.entry.quality = Some(info.quality);
        self.entry.runtime_seconds = info.runtime_seconds;
        self.entry.video_codec = info.video_codec.clone();
        self.entry.audios = Some(info.audios.clone());
        self.entry.subs = Some(info.subs.clone());
        self
    }

    /// Record only the playable path; used when the probe tool is
    /// unavailable and technical fields stay absent.
    pub fn video(mut self, path: &Path) -> Self {
        self.entry.video_file_path = Some(path.to_path_buf());
        self
    }

    /// Set the conventional poster path (existence is checked at read
    /// time, not here).
    pub fn poster(mut self, path: PathBuf) -> Self {
        self.entry.poster_path = Some(path);
        self
    }

    /// Mark the entry as expandable, with its source directory.
    pub fn dir(mut self, path: &Path) -> Self {
        self.entry.dir_path = Some(path.to_path_buf());
        self
    }

    /// Mark a movie-kind container as a multi-part series.
    pub fn series(mut self) -> Self {
        self.entry.is_series = Some(true);
        self
    }

    /// Set the franchise member's ordering number.
    pub fn franchise_number(mut self, number: Option<u32>) -> Self {
        self.entry.franchise_number = number;
        self
    }

    /// Set the season's ordering number.
    pub fn season_number(mut self, number: Option<u32>) -> Self {
        self.entry.season_number = number;
        self
    }

    /// Set the episode's overall ordering number.
    pub fn episode_overall_number(mut self, number: Option<u32>) -> Self {
        self.entry.episode_overall_number = number;
        self
    }

    /// Finish the entry.
    pub fn build(self) -> MediaEntry {
        self.entry
    }
}
