//! Git operations used by version resolution and packaging.
//!
//! Every invocation is anchored with `git -C <base-dir>` so the repository
//! is selected by configuration rather than by the process's working
//! directory.

use crate::error::{ReleaseError, Result};
use crate::exec::{CommandExecutor, stderr_message};
use camino::Utf8Path;
use log::debug;
use std::fmt;
use std::process::Output;

/// The executable used for all repository queries.
pub const GIT: &str = "git";

/// Archive formats produced by `git archive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// An uncompressed POSIX tar stream.
    Tar,
    /// A zip archive.
    Zip,
}

impl ArchiveFormat {
    /// Returns the value passed to `git archive --format=`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tar => "tar",
            Self::Zip => "zip",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for a single `git archive` invocation.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveRequest<'a> {
    /// Output format.
    pub format: ArchiveFormat,
    /// Path prefix applied to every member, including the trailing slash.
    pub prefix: &'a str,
    /// The tree-ish to export.
    pub reference: &'a str,
    /// Destination file.
    pub output: &'a Utf8Path,
}

/// Runs `git -C <base_dir> <args...>` through the executor.
fn run_git(executor: &dyn CommandExecutor, base_dir: &Utf8Path, args: &[&str]) -> Result<Output> {
    let mut full_args = Vec::with_capacity(args.len() + 2);
    full_args.push("-C");
    full_args.push(base_dir.as_str());
    full_args.extend_from_slice(args);
    executor.run(GIT, &full_args)
}

/// Describes the checked-out commit using tags, marking dirty trees.
///
/// Returns `None` when git is unavailable, the directory is not a
/// repository, or the command produced no output. Never fails.
pub fn describe(executor: &dyn CommandExecutor, base_dir: &Utf8Path) -> Option<String> {
    let output = match run_git(
        executor,
        base_dir,
        &["describe", "--always", "--dirty", "--tags"],
    ) {
        Ok(output) => output,
        Err(e) => {
            debug!("git describe could not be run: {e}");
            return None;
        }
    };

    if !output.status.success() {
        debug!("git describe failed: {}", stderr_message(&output));
        return None;
    }

    let described = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    (!described.is_empty()).then_some(described)
}

/// Returns the raw `git status --porcelain` output for the base directory.
///
/// # Errors
///
/// Returns [`ReleaseError::Io`] if git cannot be spawned, or
/// [`ReleaseError::Git`] if it exits unsuccessfully.
pub fn status_porcelain(executor: &dyn CommandExecutor, base_dir: &Utf8Path) -> Result<String> {
    let output = run_git(executor, base_dir, &["status", "--porcelain"])?;

    if !output.status.success() {
        return Err(ReleaseError::Git {
            operation: "status",
            message: stderr_message(&output),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Exports a reference into an archive file.
///
/// # Errors
///
/// Returns [`ReleaseError::Io`] if git cannot be spawned, or
/// [`ReleaseError::Git`] if the export fails.
pub fn archive(
    executor: &dyn CommandExecutor,
    base_dir: &Utf8Path,
    request: ArchiveRequest<'_>,
) -> Result<()> {
    let format_arg = format!("--format={}", request.format);
    let prefix_arg = format!("--prefix={}", request.prefix);
    let output = run_git(
        executor,
        base_dir,
        &[
            "archive",
            &format_arg,
            &prefix_arg,
            request.reference,
            "-o",
            request.output.as_str(),
        ],
    )?;

    if !output.status.success() {
        return Err(ReleaseError::Git {
            operation: "archive",
            message: stderr_message(&output),
        });
    }

    debug!("exported {} as {} to {}", request.reference, request.format, request.output);
    Ok(())
}
