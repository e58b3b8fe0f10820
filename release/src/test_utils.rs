//! Shared test utilities for the release crate.

use crate::error::{ReleaseError, Result};
use crate::exec::CommandExecutor;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::process::{ExitStatus, Output};

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// Creates a successful command `Output` with empty stdout and stderr.
#[must_use]
pub fn success_output() -> Output {
    stdout_output("")
}

/// Creates a successful command `Output` with the given stdout text.
#[must_use]
pub fn stdout_output(stdout: &str) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}

/// Creates a failed command `Output` with the given stderr message.
#[must_use]
pub fn failure_output(stderr: &str) -> Output {
    Output {
        status: exit_status(128),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Creates the error a missing executable produces when spawned.
#[must_use]
pub fn not_found_error() -> ReleaseError {
    ReleaseError::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "No such file or directory",
    ))
}

/// Represents an expected command invocation for testing.
#[derive(Debug)]
pub struct ExpectedCall {
    /// The command to execute (e.g., "git").
    pub cmd: &'static str,
    /// The arguments to pass to the command.
    pub args: Vec<String>,
    /// The result to return when this command is invoked.
    pub result: Result<Output>,
}

impl ExpectedCall {
    /// Builds an expected `git` invocation from borrowed arguments.
    #[must_use]
    pub fn git(args: &[&str], result: Result<Output>) -> Self {
        Self {
            cmd: "git",
            args: args.iter().map(|arg| (*arg).to_owned()).collect(),
            result,
        }
    }
}

/// A stub implementation of `CommandExecutor` for testing.
///
/// Records expected command invocations and returns predefined results,
/// allowing tests to verify command execution without side effects. An
/// unexpected or mismatched invocation yields [`ReleaseError::StubMismatch`].
#[derive(Debug)]
pub struct StubExecutor {
    expected: RefCell<VecDeque<ExpectedCall>>,
}

impl StubExecutor {
    /// Creates a new `StubExecutor` with the given expected calls.
    #[must_use]
    pub fn new(expected: Vec<ExpectedCall>) -> Self {
        Self {
            expected: RefCell::new(expected.into()),
        }
    }

    /// Returns the number of scripted invocations not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.expected.borrow().len()
    }

    /// Asserts that all expected command invocations have been consumed.
    ///
    /// # Panics
    ///
    /// Panics if there are remaining expected calls that were not invoked.
    pub fn assert_finished(&self) {
        let remaining = self.remaining();
        assert!(
            remaining == 0,
            "expected no further command invocations, {remaining} still scripted"
        );
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        let Some(call) = self.expected.borrow_mut().pop_front() else {
            return Err(ReleaseError::StubMismatch {
                message: format!("unexpected invocation: {cmd} {}", args.join(" ")),
            });
        };

        if call.cmd != cmd || call.args != args {
            return Err(ReleaseError::StubMismatch {
                message: format!(
                    "expected `{} {}`, got `{cmd} {}`",
                    call.cmd,
                    call.args.join(" "),
                    args.join(" ")
                ),
            });
        }

        call.result
    }
}
