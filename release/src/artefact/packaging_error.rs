//! Error types for archive operations.
//!
//! Covers I/O failures while appending to or compressing a tar stream and
//! zip format errors while extending a zip archive.

use thiserror::Error;

/// Errors arising from archive operations.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// An I/O operation failed (reading the archive, writing the output).
    #[error("I/O error during packaging: {0}")]
    Io(#[from] std::io::Error),

    /// The zip archive could not be parsed or extended.
    #[error("zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
