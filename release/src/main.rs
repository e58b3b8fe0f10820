//! agentxcpp release packager entrypoint.
//!
//! Refuses to run on a dirty working tree, then writes
//! `<product>-<version>.tgz` and `<product>-<version>.zip` to the delivery
//! directory.

use agentxcpp_release::cli::Cli;
use agentxcpp_release::config::{ReleaseConfig, absolute_base_dir};
use agentxcpp_release::error::{ReleaseError, Result};
use agentxcpp_release::exec::{CommandExecutor, SystemCommandExecutor};
use agentxcpp_release::output::Reporter;
use agentxcpp_release::packager::{package_release, plan_release, report_plan};
use clap::Parser;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &SystemCommandExecutor, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, executor: &dyn CommandExecutor, stderr: &mut dyn Write) -> Result<()> {
    let base_dir = absolute_base_dir(cli.base_dir.as_deref())?;
    let config = ReleaseConfig::load(&base_dir, cli.overrides())?;
    let mut reporter = Reporter::new(stderr, cli.quiet);

    if cli.dry_run {
        let plan = plan_release(executor, &config)?;
        report_plan(&plan, &mut reporter);
        return Ok(());
    }

    package_release(executor, &config, &mut reporter)?;
    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, &err);
            if let ReleaseError::DirtyRepository { entries } = &err {
                for entry in entries {
                    write_stderr_line(stderr, format!("  {entry}"));
                }
            }
            err.exit_code()
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
