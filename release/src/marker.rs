//! Transient version marker file.
//!
//! The marker holds the resolved version followed by a newline. It is
//! written beside the sources before archiving, copied into each archive,
//! and removed once both archives exist. It is not removed on failure.

use crate::error::Result;
use crate::version::{VERSION_FILE_NAME, VersionString};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;

/// A version marker written to disk for the duration of a packaging run.
#[derive(Debug)]
pub struct VersionMarker {
    path: Utf8PathBuf,
}

impl VersionMarker {
    /// Writes `<base_dir>/version` containing `version` and a newline.
    ///
    /// An existing file at that path is overwritten.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn create(base_dir: &Utf8Path, version: &VersionString) -> Result<Self> {
        let path = base_dir.join(VERSION_FILE_NAME);
        fs::write(&path, format!("{version}\n"))?;
        debug!("wrote version marker {path}");
        Ok(Self { path })
    }

    /// Location of the marker on disk.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Deletes the marker file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be removed.
    pub fn remove(self) -> Result<()> {
        fs::remove_file(&self.path)?;
        debug!("removed version marker {}", self.path);
        Ok(())
    }
}
