//! External command execution.
//!
//! Every git invocation made by the release tooling goes through the
//! [`CommandExecutor`] trait so tests can script the responses.

use crate::error::{ReleaseError, Result};
use log::trace;
use std::process::{Command, Output};

/// Abstraction for running external commands.
pub trait CommandExecutor {
    /// Runs a command with arguments and returns the captured output.
    ///
    /// The call blocks until the process exits.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or running the command.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use agentxcpp_release::exec::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let executor = SystemCommandExecutor;
    /// let output = executor.run("git", &["--version"])?;
    /// assert!(output.status.success());
    /// # Ok::<(), agentxcpp_release::error::ReleaseError>(())
    /// ```
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        trace!("running {cmd} {}", args.join(" "));
        Command::new(cmd)
            .args(args)
            .output()
            .map_err(ReleaseError::from)
    }
}

/// Returns the trimmed, lossily decoded stderr of a finished command.
pub(crate) fn stderr_message(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_owned()
}
