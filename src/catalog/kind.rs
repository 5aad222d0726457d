//! Media kind inference from vault folder names.

use std::path::Path;

use vv_core::MediaKind;

/// Infer the semantic media kind from a kind folder's path.
///
/// Matches the final path segment case-insensitively: `movies`,
/// `shows`, and `documentaries` map to their kinds; any other folder
/// is unclassified ([`MediaKind::All`]).
pub fn kind_from_dir(path: &Path) -> MediaKind {
    let base = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match base.as_str() {
        "movies" => MediaKind::Movie,
        "shows" => MediaKind::Show,
        "documentaries" => MediaKind::Documentary,
        _ => MediaKind::All,
    }
}
