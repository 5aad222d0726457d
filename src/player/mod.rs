//! Playback delegation to the OS's default file-association handler.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

/// Result of a playback request: an explicit success flag plus message,
/// never an error across the boundary.
#[derive(Debug, Clone, Serialize)]
pub struct PlaybackOutcome {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlaybackOutcome {
    fn success() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }
}

/// Open a video file with the OS's default handler.
///
/// The file must exist; the opener process is spawned and not awaited.
pub async fn play(path: &Path) -> PlaybackOutcome {
    match try_play(path).await {
        Ok(()) => PlaybackOutcome::success(),
        Err(e) => {
            warn!("Playback failed for {}: {e}", path.display());
            PlaybackOutcome::failure(e.to_string())
        }
    }
}

async fn try_play(path: &Path) -> vv_core::Result<()> {
    let abs = absolute(path)?;
    tokio::fs::metadata(&abs).await?;

    let mut command = opener_command(&abs);
    command
        .spawn()
        .map_err(|e| vv_core::Error::tool(opener_name(), format!("failed to spawn: {e}")))?;
    Ok(())
}

fn absolute(path: &Path) -> vv_core::Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(vv_core::Error::validation("no video path provided"));
    }
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(target_os = "macos")]
fn opener_name() -> &'static str {
    "open"
}

#[cfg(target_os = "windows")]
fn opener_name() -> &'static str {
    "cmd"
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_name() -> &'static str {
    "xdg-open"
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(path: &Path) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
