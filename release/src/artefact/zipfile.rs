//! Zip archive helpers.

use super::packaging_error::PackagingError;
use log::debug;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Permissions recorded for appended members.
const MEMBER_MODE: u32 = 0o644;

/// Append `source` to the zip archive at `archive_path` as `member`.
///
/// The member is stored uncompressed. Existing members and the archive
/// comment are preserved.
///
/// # Errors
///
/// Returns [`PackagingError::Io`] if either file cannot be accessed, or
/// [`PackagingError::Zip`] if the archive is malformed.
pub fn append_file(archive_path: &Path, source: &Path, member: &str) -> Result<(), PackagingError> {
    let contents = fs::read(source)?;
    debug!(
        "appending {member} ({} bytes) to {}",
        contents.len(),
        archive_path.display()
    );

    let file = OpenOptions::new().read(true).write(true).open(archive_path)?;
    let mut writer = ZipWriter::new_append(file)?;
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .unix_permissions(MEMBER_MODE);
    writer.start_file(member, options)?;
    writer.write_all(&contents)?;
    writer.finish()?;
    Ok(())
}
