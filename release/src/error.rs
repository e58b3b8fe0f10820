//! Error types for the agentxcpp release tooling.
//!
//! This module defines semantic error variants for the packaging run. Each
//! variant carries enough context to print an actionable diagnostic, and
//! [`ReleaseError::exit_code`] maps the variants onto process exit codes.

use crate::artefact::packaging_error::PackagingError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Exit code reported when the working tree fails the cleanliness gate.
pub const DIRTY_EXIT_CODE: i32 = -1;

/// Exit code reported for every other failure.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Errors that can occur while resolving a version or packaging a release.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// The working tree has changed or staged tracked files.
    #[error("Your repository is dirty. Use 'git status'.")]
    DirtyRepository {
        /// The porcelain status lines that made the tree dirty.
        entries: Vec<String>,
    },

    /// The working tree status could not be queried at all.
    #[error("Can't determine repository state. Are you in a git repo? ({reason})")]
    RepositoryStateUnknown {
        /// Description of why the status query failed.
        reason: String,
    },

    /// A git operation exited unsuccessfully.
    #[error("git {operation} failed: {message}")]
    Git {
        /// The git operation that failed (status, archive, etc.).
        operation: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Building, extending, or compressing an archive failed.
    #[error(transparent)]
    Packaging(#[from] PackagingError),

    /// The `release.toml` file could not be parsed.
    #[error("invalid configuration at {path}: {reason}")]
    InvalidConfig {
        /// Path to the offending configuration file.
        path: Utf8PathBuf,
        /// Description of the parse error.
        reason: String,
    },

    /// The delivery directory would overlap the source tree or its git
    /// metadata, so resetting it would destroy the checkout.
    #[error("refusing to use {path} as delivery directory: {reason}")]
    UnsafeDeliveryDir {
        /// The rejected delivery directory.
        path: Utf8PathBuf,
        /// Why the directory is unsafe to delete.
        reason: &'static str,
    },

    /// A path could not be represented as UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the offending path.
        path: String,
    },

    /// Test stub received an unexpected or mismatched command invocation.
    #[cfg(any(test, feature = "test-support"))]
    #[error("stub mismatch: {message}")]
    StubMismatch {
        /// Description of what was expected versus what was received.
        message: String,
    },
}

impl ReleaseError {
    /// Returns `true` when the error comes from the cleanliness gate.
    #[must_use]
    pub fn is_gate_failure(&self) -> bool {
        matches!(
            self,
            Self::DirtyRepository { .. } | Self::RepositoryStateUnknown { .. }
        )
    }

    /// Maps the error onto the process exit code for the packaging binary.
    ///
    /// Gate failures, dirty or indeterminate, share [`DIRTY_EXIT_CODE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use agentxcpp_release::error::{DIRTY_EXIT_CODE, ReleaseError};
    ///
    /// let err = ReleaseError::DirtyRepository { entries: vec![" M README".to_owned()] };
    /// assert_eq!(err.exit_code(), DIRTY_EXIT_CODE);
    /// ```
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.is_gate_failure() {
            DIRTY_EXIT_CODE
        } else {
            FAILURE_EXIT_CODE
        }
    }
}

/// Result type alias using [`ReleaseError`].
pub type Result<T> = std::result::Result<T, ReleaseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn dirty_repository_points_at_git_status() {
        let err = ReleaseError::DirtyRepository {
            entries: vec![" M src/oid.cpp".to_owned()],
        };
        assert!(err.to_string().contains("git status"));
    }

    #[test]
    fn unknown_state_includes_reason() {
        let err = ReleaseError::RepositoryStateUnknown {
            reason: "not a git repository".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Can't determine repository state"));
        assert!(msg.contains("not a git repository"));
    }

    #[test]
    fn git_error_includes_operation_and_message() {
        let err = ReleaseError::Git {
            operation: "archive",
            message: "unknown revision".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("archive"));
        assert!(msg.contains("unknown revision"));
    }

    #[rstest]
    #[case::dirty(ReleaseError::DirtyRepository { entries: Vec::new() }, DIRTY_EXIT_CODE)]
    #[case::unknown(
        ReleaseError::RepositoryStateUnknown { reason: "spawn".to_owned() },
        DIRTY_EXIT_CODE
    )]
    #[case::git(
        ReleaseError::Git { operation: "archive", message: String::new() },
        FAILURE_EXIT_CODE
    )]
    #[case::io(ReleaseError::Io(std::io::Error::other("disk full")), FAILURE_EXIT_CODE)]
    #[case::unsafe_delivery_dir(
        ReleaseError::UnsafeDeliveryDir { path: Utf8PathBuf::from("/src"), reason: "overlap" },
        FAILURE_EXIT_CODE
    )]
    fn exit_code_separates_gate_failures(#[case] err: ReleaseError, #[case] expected: i32) {
        assert_eq!(err.exit_code(), expected);
    }
}
