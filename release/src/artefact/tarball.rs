//! Tar archive helpers.
//!
//! `git archive` writes a complete tar stream, terminated by zero blocks.
//! Appending a member means truncating the stream right after the last
//! member's data and writing the new member plus a fresh terminator.

use super::packaging_error::PackagingError;
use flate2::Compression;
use flate2::write::GzEncoder;
use log::debug;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Seek, SeekFrom};
use std::path::Path;

/// Size of a tar block; member data is padded to a multiple of it.
const BLOCK_SIZE: u64 = 512;

/// Append `source` to the tar archive at `archive_path` as `member`.
///
/// Existing members are left untouched. The new member takes its mode and
/// modification time from `source`.
///
/// # Errors
///
/// Returns [`PackagingError::Io`] if the archive cannot be read or
/// rewritten, or if `source` cannot be read.
pub fn append_file(archive_path: &Path, source: &Path, member: &str) -> Result<(), PackagingError> {
    let end = members_end_offset(archive_path)?;
    debug!(
        "appending {member} to {} at offset {end}",
        archive_path.display()
    );

    let mut file = OpenOptions::new().read(true).write(true).open(archive_path)?;
    file.set_len(end)?;
    file.seek(SeekFrom::Start(end))?;

    let mut builder = tar::Builder::new(file);
    builder.append_path_with_name(source, member)?;
    builder.into_inner()?;
    Ok(())
}

/// Return the offset just past the last member's padded data.
///
/// An archive without members yields `0`.
fn members_end_offset(archive_path: &Path) -> io::Result<u64> {
    let mut archive = tar::Archive::new(File::open(archive_path)?);
    let mut end = 0;
    for entry in archive.entries()? {
        let entry = entry?;
        end = entry.raw_file_position() + entry.size().div_ceil(BLOCK_SIZE) * BLOCK_SIZE;
    }
    Ok(end)
}

/// Gzip-compress `source` into `dest`, replacing any existing `dest`.
///
/// # Errors
///
/// Returns [`PackagingError::Io`] if either file cannot be accessed.
pub fn gzip_file(source: &Path, dest: &Path) -> Result<(), PackagingError> {
    let mut input = File::open(source)?;
    let mut encoder = GzEncoder::new(File::create(dest)?, Compression::best());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?;
    Ok(())
}

/// Gzip-compress `source` into `dest` and delete `source`.
///
/// # Errors
///
/// Returns [`PackagingError::Io`] if compression or removal fails.
pub fn gzip_and_remove(source: &Path, dest: &Path) -> Result<(), PackagingError> {
    gzip_file(source, dest)?;
    fs::remove_file(source)?;
    Ok(())
}
