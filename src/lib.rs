//! Vaultview - local media vault catalog engine
//!
//! This library crate exposes the catalog, poster, and playback services
//! for integration testing.

pub mod catalog;
pub mod config;
pub mod player;
pub mod posters;
pub mod vault;

pub use catalog::Catalog;
pub use vault::Vault;
