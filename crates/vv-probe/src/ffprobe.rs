//! FFprobe-based video probing.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use vv_core::{Quality, Result};

use crate::command::ToolCommand;
use crate::prober::Prober;
use crate::types::MediaInfo;

#[derive(Debug, Default, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    height: Option<u32>,
    duration: Option<String>,
    #[serde(default)]
    tags: FfprobeTags,
}

/// Stream tags vary in casing across muxers; the keys are checked in
/// `language`, `LANGUAGE`, `lang` priority.
#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    language: Option<String>,
    #[serde(rename = "LANGUAGE")]
    language_upper: Option<String>,
    lang: Option<String>,
}

/// [`Prober`] implementation shelling out to `ffprobe` with JSON output.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    tool: PathBuf,
    timeout: Duration,
}

impl FfprobeProber {
    /// Create a prober invoking the given ffprobe executable.
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the per-invocation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

#[async_trait]
impl Prober for FfprobeProber {
    fn name(&self) -> &'static str {
        "ffprobe"
    }

    async fn probe(&self, path: &Path) -> Result<MediaInfo> {
        tracing::debug!("Probing {:?}", path);

        let mut cmd = ToolCommand::new(self.tool.clone());
        cmd.args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
            "-show_chapters",
        ])
        .arg(path.to_string_lossy())
        .timeout(self.timeout);

        let output = cmd.execute().await?;
        parse_output(path, &output.stdout)
    }
}

/// Parse ffprobe's JSON output into a [`MediaInfo`].
fn parse_output(path: &Path, json: &str) -> Result<MediaInfo> {
    let output: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| vv_core::Error::probe(format!("unparseable ffprobe output: {e}")))?;

    let video = output
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"));

    let height = video.and_then(|v| v.height);
    let video_codec = video.and_then(|v| v.codec_name.clone());

    // Container duration wins; the video stream's own duration is the
    // fallback (MKV typically reports it only at container level).
    let runtime_seconds = output
        .format
        .duration
        .as_deref()
        .or_else(|| video.and_then(|v| v.duration.as_deref()))
        .and_then(|s| s.parse::<f64>().ok());

    let audios = languages_of(&output.streams, "audio");
    let subs = languages_of(&output.streams, "subtitle");

    Ok(MediaInfo {
        file_path: path.to_path_buf(),
        quality: Quality::from_height(height),
        video_codec,
        runtime_seconds,
        audios,
        subs,
    })
}

/// Collect the deduplicated language set of all streams of one type.
fn languages_of(streams: &[FfprobeStream], codec_type: &str) -> Vec<String> {
    let set: BTreeSet<String> = streams
        .iter()
        .filter(|s| s.codec_type.as_deref() == Some(codec_type))
        .filter_map(|s| language_from_tags(&s.tags))
        .collect();
    set.into_iter().collect()
}

/// Extract a normalized language tag, trying the known tag keys in
/// priority order. Empty and whitespace-only values are rejected.
fn language_from_tags(tags: &FfprobeTags) -> Option<String> {
    [&tags.language, &tags.language_upper, &tags.lang]
        .into_iter()
        .flatten()
        .map(|lang| lang.trim().to_lowercase())
        .find(|lang| !lang.is_empty())
}
