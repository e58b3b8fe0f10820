//! Console output for the release binaries.
//!
//! Progress goes to a caller-supplied writer (stderr in the binaries) so
//! tests can capture it. Write failures are ignored.

use camino::Utf8Path;
use std::fmt::Display;
use std::io::Write;

/// Writes human-readable progress lines.
pub struct Reporter<'a> {
    out: &'a mut dyn Write,
    quiet: bool,
}

impl<'a> Reporter<'a> {
    /// Create a reporter writing to `out`; `quiet` suppresses progress lines.
    pub fn new(out: &'a mut dyn Write, quiet: bool) -> Self {
        Self { out, quiet }
    }

    /// Writes a progress line unless the reporter is quiet.
    pub fn progress(&mut self, message: impl Display) {
        if !self.quiet {
            self.line(message);
        }
    }

    /// Writes a line regardless of the quiet setting.
    pub fn line(&mut self, message: impl Display) {
        if writeln!(self.out, "{message}").is_err() {
            // Best-effort output; ignore write failures.
        }
    }
}

/// Format the closing message of a successful run.
///
/// # Examples
///
/// ```
/// use agentxcpp_release::output::success_message;
/// use camino::Utf8Path;
///
/// let message = success_message("1.0", Utf8Path::new("deliv"));
/// assert!(message.contains("Created delivery for version 1.0"));
/// assert!(message.ends_with("deliv/"));
/// ```
#[must_use]
pub fn success_message(version: &str, delivery_dir: &Utf8Path) -> String {
    format!(
        "Created delivery for version {version}\nThe files to deliver are now located in {delivery_dir}/"
    )
}
