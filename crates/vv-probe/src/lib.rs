//! # vv-probe
//!
//! Technical probing of video files for the vaultview catalog.
//!
//! The catalog assembler depends on the [`Prober`] capability trait,
//! which extracts a [`MediaInfo`] (resolution class, codec, runtime,
//! audio and subtitle languages) from a video file. The production
//! implementation, [`FfprobeProber`], shells out to `ffprobe` with
//! structured JSON output under a bounded timeout; tests substitute a
//! fake.
//!
//! ## Quick start
//!
//! ```no_run
//! use vv_probe::{FfprobeProber, Prober};
//! use std::path::Path;
//!
//! # async fn example() -> vv_core::Result<()> {
//! let prober = FfprobeProber::default();
//! let info = prober.probe(Path::new("movie.mkv")).await?;
//! println!("{} {:?}", info.quality, info.video_codec);
//! # Ok(())
//! # }
//! ```

mod command;
mod ffprobe;
mod prober;
mod tools;
mod types;

pub use command::{ToolCommand, ToolOutput};
pub use ffprobe::FfprobeProber;
pub use prober::Prober;
pub use tools::{check_tool, check_tools, require_tool, ToolInfo};
pub use types::MediaInfo;
