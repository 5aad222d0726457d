//! Probe result types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vv_core::Quality;

/// Technical attributes extracted from one video file.
///
/// Language lists carry set semantics: deduplicated, lower-cased,
/// deterministically ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Path to the probed file.
    pub file_path: PathBuf,
    /// Resolution class derived from the first video stream's height.
    pub quality: Quality,
    /// Codec name of the first video stream.
    pub video_codec: Option<String>,
    /// Duration in seconds; container-level, falling back to the video
    /// stream's own duration.
    pub runtime_seconds: Option<f64>,
    /// Audio stream languages.
    pub audios: Vec<String>,
    /// Subtitle stream languages.
    pub subs: Vec<String>,
}
