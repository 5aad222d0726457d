//! Filename conventions used by the vault scanner.

use std::path::Path;

/// Video extensions that qualify a file as a playable catalog unit.
const VIDEO_EXTENSIONS: &[&str] = &["mkv", "mp4"];

/// Check if a path has a qualifying video extension (case-insensitive).
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Check if a file name is hidden (leading dot).
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Check if a file name is a sidecar metadata candidate: a
/// case-insensitive `.json` extension and not hidden.
pub fn is_sidecar_candidate(name: &str) -> bool {
    !is_hidden(name) && name.to_lowercase().ends_with(".json")
}

/// Get the list of qualifying video extensions.
#[must_use]
pub fn video_extensions() -> &'static [&'static str] {
    VIDEO_EXTENSIONS
}
