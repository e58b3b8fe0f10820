//! agentxcpp release tooling library.
//!
//! This crate resolves the version of an agentxcpp source tree and packages
//! a tagged tree into `.tgz` and `.zip` release archives. It backs the
//! `agentxcpp-version` and `agentxcpp-release` binaries and can be driven
//! programmatically with a scripted [`exec::CommandExecutor`] for testing.
//!
//! # Modules
//!
//! - [`artefact`] - Artefact naming and archive manipulation
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Layered packaging configuration
//! - [`error`] - Semantic error types and exit codes
//! - [`exec`] - External command execution
//! - [`git`] - Git describe, status, and archive invocations
//! - [`marker`] - Transient version marker file
//! - [`output`] - Console progress reporting
//! - [`packager`] - Release packaging pipeline
//! - [`status`] - Working tree cleanliness gate
//! - [`version`] - Version string resolution

pub mod artefact;
pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod git;
pub mod marker;
pub mod output;
pub mod packager;
pub mod status;
pub mod version;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
