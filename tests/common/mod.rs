//! Shared helpers for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use vv_core::Quality;
use vv_probe::{MediaInfo, Prober};

/// A prober that fabricates results from a fixed height and counts
/// invocations.
pub struct FakeProber {
    pub height: u32,
    pub calls: AtomicUsize,
}

impl FakeProber {
    pub fn new(height: u32) -> Self {
        Self {
            height,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for FakeProber {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn probe(&self, path: &Path) -> vv_core::Result<MediaInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(MediaInfo {
            file_path: path.to_path_buf(),
            quality: Quality::from_height(Some(self.height)),
            video_codec: Some("hevc".to_string()),
            runtime_seconds: Some(5400.0),
            audios: vec!["eng".to_string()],
            subs: vec!["swe".to_string()],
        })
    }
}

/// A prober that always fails, as when ffprobe is not installed.
pub struct UnavailableProber;

#[async_trait]
impl Prober for UnavailableProber {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn probe(&self, _path: &Path) -> vv_core::Result<MediaInfo> {
        Err(vv_core::Error::tool("ffprobe", "not found on PATH"))
    }
}

/// Create a directory path, including parents.
pub fn mkdirs(path: &Path) -> PathBuf {
    std::fs::create_dir_all(path).unwrap();
    path.to_path_buf()
}

/// Create an empty file.
pub fn touch(path: &Path) {
    std::fs::write(path, b"").unwrap();
}

/// Write a sidecar JSON file named `details.json` in `dir`.
pub fn write_sidecar(dir: &Path, json: &str) {
    std::fs::write(dir.join("details.json"), json).unwrap();
}
