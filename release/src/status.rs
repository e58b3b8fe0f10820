//! Working tree cleanliness gate.
//!
//! A repository is clean when no tracked file is modified and nothing is
//! staged. Untracked files are allowed.

use crate::error::{ReleaseError, Result};
use crate::exec::CommandExecutor;
use crate::git;
use camino::Utf8Path;
use log::debug;

/// Porcelain status code marking an untracked path.
const UNTRACKED_MARKER: &str = "??";

/// Classification of one `git status --porcelain` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEntry {
    /// An untracked path; ignored by the gate.
    Untracked(String),
    /// A modified, staged, deleted, renamed, or conflicted tracked path.
    Changed(String),
}

/// Parsed working tree status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingTreeStatus {
    entries: Vec<StatusEntry>,
}

impl WorkingTreeStatus {
    /// Parses porcelain output, skipping blank lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use agentxcpp_release::status::WorkingTreeStatus;
    ///
    /// let status = WorkingTreeStatus::parse("?? notes.txt\n");
    /// assert!(status.is_clean());
    ///
    /// let status = WorkingTreeStatus::parse(" M src/oid.cpp\n?? notes.txt\n");
    /// assert!(!status.is_clean());
    /// ```
    #[must_use]
    pub fn parse(porcelain: &str) -> Self {
        let entries = porcelain
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| {
                if line.starts_with(UNTRACKED_MARKER) {
                    StatusEntry::Untracked(line.to_owned())
                } else {
                    StatusEntry::Changed(line.to_owned())
                }
            })
            .collect();
        Self { entries }
    }

    /// All parsed entries in output order.
    #[must_use]
    pub fn entries(&self) -> &[StatusEntry] {
        &self.entries
    }

    /// Lines describing changed or staged tracked files.
    #[must_use]
    pub fn changed(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                StatusEntry::Changed(line) => Some(line.clone()),
                StatusEntry::Untracked(_) => None,
            })
            .collect()
    }

    /// Returns `true` if no tracked file is changed or staged.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.entries
            .iter()
            .all(|entry| matches!(entry, StatusEntry::Untracked(_)))
    }
}

/// Verifies that the repository at `base_dir` is clean.
///
/// # Errors
///
/// Returns [`ReleaseError::RepositoryStateUnknown`] if the status cannot be
/// queried, or [`ReleaseError::DirtyRepository`] if any tracked file is
/// changed or staged.
pub fn check_clean(executor: &dyn CommandExecutor, base_dir: &Utf8Path) -> Result<()> {
    let porcelain = git::status_porcelain(executor, base_dir).map_err(|e| {
        ReleaseError::RepositoryStateUnknown {
            reason: e.to_string(),
        }
    })?;

    let status = WorkingTreeStatus::parse(&porcelain);
    if status.is_clean() {
        debug!("working tree at {base_dir} is clean");
        return Ok(());
    }

    Err(ReleaseError::DirtyRepository {
        entries: status.changed(),
    })
}
