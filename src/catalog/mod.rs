//! Vault catalog assembler.
//!
//! This module turns the vault's directory conventions into ordered,
//! typed [`MediaEntry`] collections, one level at a time:
//!
//! - top-level titles under the vault's kind folders,
//! - members of a franchise grouping,
//! - playable members of a multi-part series,
//! - seasons and episodes of a show.
//!
//! Entries with children carry `dir_path` and are expanded lazily by a
//! later request, bounding I/O per screen transition. Per-entry
//! failures (missing sidecar, wrong video count, probe errors) are
//! logged and skipped; only the requested directory itself being
//! unreadable empties a listing.

pub mod entry;
pub mod kind;
pub mod sidecar;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};
use vv_core::{paths, MediaEntry, MediaKind, NumberedName, Season, SeasonsListing};
use vv_probe::Prober;

use crate::vault::Vault;
use entry::EntryBuilder;
use kind::kind_from_dir;
use sidecar::read_sidecar;

/// The catalog service: owns the probing capability and assembles
/// listings on demand. Nothing is cached between requests; every call
/// re-reads the filesystem.
pub struct Catalog {
    prober: Arc<dyn Prober>,
}

impl Catalog {
    /// Create a catalog backed by the given prober.
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self { prober }
    }

    /// List every title directly under the vault's kind folders,
    /// merged flat and sorted by case-insensitive title.
    ///
    /// Kind folders are scanned concurrently; they are independent and
    /// join before the merged sort.
    pub async fn list_top_level(&self, vault: &Vault) -> Vec<MediaEntry> {
        let kind_dirs = match subdirectories(vault.root()).await {
            Ok(dirs) => dirs,
            Err(e) => {
                warn!("Failed to enumerate vault root {}: {e}", vault.root().display());
                return Vec::new();
            }
        };

        let scans = kind_dirs.iter().map(|dir| self.list_kind_folder(dir));
        let mut entries: Vec<MediaEntry> = join_all(scans).await.into_iter().flatten().collect();
        entries.sort_by_key(MediaEntry::title_sort_key);
        entries
    }

    /// List the members of a franchise grouping, ordered by their
    /// numeric folder-name prefix. Members are containers to expand
    /// further, so nothing is probed at this level.
    pub async fn list_franchise(&self, parent: &MediaEntry) -> Vec<MediaEntry> {
        if parent.is_franchise != Some(true) {
            debug!("list_franchise called on non-franchise entry: {}", parent.title);
            return Vec::new();
        }
        let Some(dir) = parent.dir_path.as_deref() else {
            return Vec::new();
        };
        let subdirs = match subdirectories(dir).await {
            Ok(dirs) => dirs,
            Err(e) => {
                warn!("Failed to enumerate franchise {}: {e}", dir.display());
                return Vec::new();
            }
        };

        let mut members: Vec<(NumberedName, MediaEntry)> = Vec::new();
        for member_dir in subdirs {
            let Some(sidecar) = read_sidecar(&member_dir).await else {
                warn!("No valid sidecar JSON in: {}", member_dir.display());
                continue;
            };
            let Some(title) = sidecar.titled() else {
                warn!("Sidecar without title in: {}", member_dir.display());
                continue;
            };
            let numbered = NumberedName::parse(&dir_name(&member_dir));
            let member = EntryBuilder::new(title, parent.kind)
                .sidecar(&sidecar)
                .poster(member_dir.join("poster.webp"))
                .dir(&member_dir)
                .franchise_number(numbered.number)
                .build();
            members.push((numbered, member));
        }

        members.sort_by(|a, b| a.0.cmp(&b.0));
        members.into_iter().map(|(_, member)| member).collect()
    }

    /// List the playable members of a multi-part series, sorted by
    /// case-insensitive title. A series member IS a playable unit, so
    /// directories without exactly one qualifying video are skipped.
    pub async fn list_series(&self, parent: &MediaEntry) -> Vec<MediaEntry> {
        if parent.is_series != Some(true) {
            debug!("list_series called on non-series entry: {}", parent.title);
            return Vec::new();
        }
        let Some(dir) = parent.dir_path.as_deref() else {
            return Vec::new();
        };
        let subdirs = match subdirectories(dir).await {
            Ok(dirs) => dirs,
            Err(e) => {
                warn!("Failed to enumerate series {}: {e}", dir.display());
                return Vec::new();
            }
        };

        let mut members = Vec::new();
        for member_dir in subdirs {
            let Some(sidecar) = read_sidecar(&member_dir).await else {
                warn!("No valid sidecar JSON in: {}", member_dir.display());
                continue;
            };
            let Some(title) = sidecar.titled() else {
                warn!("Sidecar without title in: {}", member_dir.display());
                continue;
            };
            let Some(video) = self.single_video_in(&member_dir).await else {
                warn!(
                    "Series member without exactly one video, skipping: {}",
                    member_dir.display()
                );
                continue;
            };
            let builder = EntryBuilder::new(title, parent.kind)
                .sidecar(&sidecar)
                .poster(member_dir.join("poster.webp"));
            members.push(self.probed(builder, &video).await.build());
        }

        members.sort_by_key(MediaEntry::title_sort_key);
        members
    }

    /// List a show's seasons with their episodes.
    ///
    /// Season folders follow `"<seasonNumber>_<title>"`; episode files
    /// follow `"<overallNumber>_<title>.{mkv,mp4}"`. Episodes are
    /// ordered by overall number and densely renumbered 1..N within
    /// each season; seasons are ordered by season number. The running
    /// episode total across seasons is returned alongside.
    pub async fn list_seasons_and_episodes(&self, show: &MediaEntry) -> SeasonsListing {
        if show.kind != MediaKind::Show {
            debug!("list_seasons_and_episodes called on non-show entry: {}", show.title);
            return SeasonsListing::default();
        }
        let Some(dir) = show.dir_path.as_deref() else {
            return SeasonsListing::default();
        };
        let season_dirs = match subdirectories(dir).await {
            Ok(dirs) => dirs,
            Err(e) => {
                warn!("Failed to enumerate show {}: {e}", dir.display());
                return SeasonsListing::default();
            }
        };

        let mut total = 0u32;
        let mut seasons: Vec<(NumberedName, Season)> = Vec::new();
        for season_dir in season_dirs {
            let numbered = NumberedName::parse(&dir_name(&season_dir));

            let mut builder = EntryBuilder::new(numbered.label.clone(), MediaKind::Show)
                .season_number(numbered.number);
            // The season's own sidecar is optional; its fields override
            // the name-derived ones.
            if let Some(sidecar) = read_sidecar(&season_dir).await {
                builder = builder.sidecar(&sidecar);
            }
            let season_entry = builder.build();

            let episodes = self.list_episodes(&season_dir).await;
            total += episodes.len() as u32;

            seasons.push((
                numbered.clone(),
                Season {
                    season_number: numbered.number,
                    entry: season_entry,
                    episodes,
                },
            ));
        }

        seasons.sort_by(|a, b| a.0.cmp(&b.0));
        SeasonsListing {
            number_of_episodes_obtained: total,
            seasons: seasons.into_iter().map(|(_, season)| season).collect(),
        }
    }

    /// Scan one kind folder (Movies/Shows/...) for title directories.
    async fn list_kind_folder(&self, dir: &Path) -> Vec<MediaEntry> {
        let kind = kind_from_dir(dir);
        let subdirs = match subdirectories(dir).await {
            Ok(dirs) => dirs,
            Err(e) => {
                warn!("Failed to enumerate kind folder {}: {e}", dir.display());
                return Vec::new();
            }
        };

        let mut entries = Vec::new();
        for title_dir in subdirs {
            let Some(sidecar) = read_sidecar(&title_dir).await else {
                warn!("No valid sidecar JSON in: {}", title_dir.display());
                continue;
            };
            let Some(title) = sidecar.titled() else {
                warn!("Sidecar without title in: {}", title_dir.display());
                continue;
            };

            let builder = EntryBuilder::new(title, kind)
                .sidecar(&sidecar)
                .poster(title_dir.join("poster.webp"));

            let entry = match self.single_video_in(&title_dir).await {
                // Exactly one qualifying video: a directly playable title.
                Some(video) => self.probed(builder, &video).await.build(),
                // Zero or several: a container to expand lazily. A
                // movie-kind container is a multi-part series.
                None => {
                    let builder = builder.dir(&title_dir);
                    if kind == MediaKind::Movie {
                        builder.series().build()
                    } else {
                        builder.build()
                    }
                }
            };
            entries.push(entry);
        }
        entries
    }

    /// List and order the episode files of one season folder.
    async fn list_episodes(&self, season_dir: &Path) -> Vec<MediaEntry> {
        let files = match video_files(season_dir).await {
            Ok(files) => files,
            Err(e) => {
                warn!("Failed to enumerate season {}: {e}", season_dir.display());
                return Vec::new();
            }
        };

        let mut episodes: Vec<(NumberedName, MediaEntry)> = Vec::new();
        for file in files {
            let stem = file
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            let numbered = NumberedName::parse(&stem);
            let episode = EntryBuilder::new(numbered.label.clone(), MediaKind::Show)
                .episode_overall_number(numbered.number)
                .video(&file)
                .build();
            episodes.push((numbered, episode));
        }

        episodes.sort_by(|a, b| a.0.cmp(&b.0));
        let mut episodes: Vec<MediaEntry> =
            episodes.into_iter().map(|(_, episode)| episode).collect();
        for (i, episode) in episodes.iter_mut().enumerate() {
            episode.episode_number = Some(i as u32 + 1);
        }
        episodes
    }

    /// Probe a video and merge the result into the builder; on probe
    /// failure the entry keeps path-only information and the scan
    /// continues.
    async fn probed(&self, builder: EntryBuilder, video: &Path) -> EntryBuilder {
        match self.prober.probe(video).await {
            Ok(info) => builder.probe(&info),
            Err(e) => {
                warn!(
                    "{} unavailable for {}: {e}; keeping path-only info",
                    self.prober.name(),
                    video.display()
                );
                builder.video(video)
            }
        }
    }

    /// Find the single qualifying video file directly inside a
    /// directory. Zero or several candidates mean "no playable unit".
    async fn single_video_in(&self, dir: &Path) -> Option<PathBuf> {
        match video_files(dir).await {
            Ok(mut files) if files.len() == 1 => files.pop(),
            Ok(_) => None,
            Err(e) => {
                warn!("Failed to enumerate {}: {e}", dir.display());
                None
            }
        }
    }
}

/// Enumerate a directory's non-hidden subdirectories, sorted by name
/// for deterministic traversal.
async fn subdirectories(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    let mut out = Vec::new();
    while let Some(entry) = read_dir.next_entry().await? {
        let name = entry.file_name().to_string_lossy().to_string();
        if paths::is_hidden(&name) {
            continue;
        }
        if entry.file_type().await?.is_dir() {
            out.push(entry.path());
        }
    }
    out.sort();
    Ok(out)
}

/// Enumerate a directory's non-hidden qualifying video files, sorted
/// by name.
async fn video_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    let mut out = Vec::new();
    while let Some(entry) = read_dir.next_entry().await? {
        let name = entry.file_name().to_string_lossy().to_string();
        if paths::is_hidden(&name) {
            continue;
        }
        let path = entry.path();
        if entry.file_type().await?.is_file() && paths::is_video_file(&path) {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
