//! The [`Prober`] trait defining the interface for video file probing.

use async_trait::async_trait;
use std::path::Path;

use crate::types::MediaInfo;

/// A video file prober capable of extracting technical metadata.
///
/// Implementations must be safe to share across tasks (`Send + Sync`).
/// A failed probe is an ordinary error; callers treat it as
/// "tool unavailable" and fall back to path-only information rather
/// than aborting a scan.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Human-readable name identifying this prober implementation.
    fn name(&self) -> &'static str;

    /// Probe the video file at the given path.
    async fn probe(&self, path: &Path) -> vv_core::Result<MediaInfo>;
}
