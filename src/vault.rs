//! Vault root selection and validation.

use std::path::{Path, PathBuf};

use vv_core::{Error, Result};

/// A validated vault root: an existing directory whose final path
/// segment is `Content`.
///
/// Everything below the root is organized by convention
/// (`Content/{Movies,Shows,Documentaries}/<title>/...`) and scanned
/// lazily by the [`crate::catalog::Catalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    /// Validate and open a vault root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the path is not a directory or
    /// its final segment is not exactly `Content`. Hosts with an
    /// interactive chooser re-prompt on this error.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::validation(format!(
                "vault root is not a directory: {}",
                root.display()
            )));
        }
        match root.file_name().and_then(|n| n.to_str()) {
            Some("Content") => Ok(Self { root }),
            _ => Err(Error::validation(format!(
                "vault root must be the 'Content' folder, got: {}",
                root.display()
            ))),
        }
    }

    /// The validated root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
