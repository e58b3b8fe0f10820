//! Version string resolution for the source tree.
//!
//! The version is taken from the first source that yields one:
//!
//! 1. `git describe --always --dirty --tags` in the base directory;
//! 2. the first line of the `version` file in the base directory;
//! 3. the literal `unknown`.
//!
//! Resolution never fails and has no side effects.

use crate::exec::CommandExecutor;
use crate::git;
use camino::Utf8Path;
use log::{debug, warn};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// File name of the fallback version file and of the generated marker.
pub const VERSION_FILE_NAME: &str = "version";

/// Version reported when no other source is available.
pub const UNKNOWN_VERSION: &str = "unknown";

/// An opaque, trimmed version identifier.
///
/// Callers use it only as a file name component and a git reference.
///
/// # Examples
///
/// ```
/// use agentxcpp_release::version::VersionString;
///
/// let version = VersionString::new("  1.2.3\n").expect("non-empty");
/// assert_eq!(version.as_str(), "1.2.3");
/// assert!(VersionString::new(" \n").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionString(String);

impl VersionString {
    /// Trims `raw` and wraps it, returning `None` if nothing is left.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    /// The version reported when every source failed.
    #[must_use]
    pub fn unknown() -> Self {
        Self(UNKNOWN_VERSION.to_owned())
    }

    /// Return the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for VersionString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which source produced a resolved version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// `git describe` succeeded.
    Describe,
    /// The fallback `version` file was read.
    FallbackFile,
    /// Neither source was available.
    Unknown,
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Describe => "git describe",
            Self::FallbackFile => "version file",
            Self::Unknown => "default",
        })
    }
}

/// A version string together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    /// The resolved version.
    pub version: VersionString,
    /// Where the version came from.
    pub source: VersionSource,
}

/// Resolves the version of the tree rooted at `base_dir`.
///
/// Never fails: when neither git nor the fallback file yields a version,
/// the result is [`UNKNOWN_VERSION`].
pub fn resolve_version(executor: &dyn CommandExecutor, base_dir: &Utf8Path) -> ResolvedVersion {
    from_describe(executor, base_dir)
        .or_else(|| from_fallback_file(base_dir))
        .unwrap_or_else(|| {
            warn!("no version source available in {base_dir}; using \"{UNKNOWN_VERSION}\"");
            ResolvedVersion {
                version: VersionString::unknown(),
                source: VersionSource::Unknown,
            }
        })
}

/// Resolves the version and discards its provenance.
pub fn resolve_version_string(
    executor: &dyn CommandExecutor,
    base_dir: &Utf8Path,
) -> VersionString {
    resolve_version(executor, base_dir).version
}

fn from_describe(executor: &dyn CommandExecutor, base_dir: &Utf8Path) -> Option<ResolvedVersion> {
    let described = git::describe(executor, base_dir)?;
    let version = VersionString::new(&described)?;
    debug!("version {version} from git describe");
    Some(ResolvedVersion {
        version,
        source: VersionSource::Describe,
    })
}

fn from_fallback_file(base_dir: &Utf8Path) -> Option<ResolvedVersion> {
    let path = base_dir.join(VERSION_FILE_NAME);
    let version = read_first_line(&path).and_then(|line| VersionString::new(&line))?;
    debug!("version {version} from {path}");
    Some(ResolvedVersion {
        version,
        source: VersionSource::FallbackFile,
    })
}

/// Reads the first line of `path`, or `None` if it cannot be read.
fn read_first_line(path: &Utf8Path) -> Option<String> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            debug!("fallback version file {path} unavailable: {e}");
            return None;
        }
    };

    let mut line = String::new();
    match BufReader::new(file).read_line(&mut line) {
        Ok(_) => Some(line),
        Err(e) => {
            debug!("failed to read {path}: {e}");
            None
        }
    }
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
