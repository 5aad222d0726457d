//! # vv-core
//!
//! Shared types for the vaultview media-vault browser: the unified
//! [`Error`] type, the media catalog model ([`MediaEntry`] and friends),
//! filename conventions ([`paths`]), and `"<N>_<rest>"` ordering-prefix
//! parsing ([`naming`]).

pub mod error;
pub mod media;
pub mod naming;
pub mod paths;

pub use error::{Error, Result};
pub use media::{format_hhmmss, MediaEntry, MediaKind, Quality, Season, SeasonsListing};
pub use naming::NumberedName;
