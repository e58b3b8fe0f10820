//! Release artefact naming and archive manipulation.
//!
//! # Sub-modules
//!
//! - [`naming`] - Artefact stem, prefix, and file names (`ArtefactName`).
//! - [`packaging_error`] - Error types for archive operations.
//! - [`tarball`] - Appending to tar archives and gzip compression.
//! - [`zipfile`] - Appending to zip archives.

pub mod naming;
pub mod packaging_error;
pub mod tarball;
pub mod zipfile;
