//! Prints the version string of an agentxcpp source tree.
//!
//! Thin CLI wrapper around [`agentxcpp_release::version::resolve_version`].
//! Always succeeds; prints `unknown` when no version source is available.

use agentxcpp_release::config::absolute_base_dir;
use agentxcpp_release::exec::SystemCommandExecutor;
use agentxcpp_release::version::resolve_version_string;
use camino::Utf8PathBuf;
use clap::Parser;

/// Print the version of an agentxcpp source tree.
///
/// Tries `git describe --always --dirty --tags`, then the first line of the
/// `version` file in the base directory, then falls back to `unknown`.
#[derive(Parser, Debug)]
#[command(name = "agentxcpp-version")]
#[command(version, about = "Print the version of an agentxcpp source tree")]
struct VersionCli {
    /// Root of the source tree [default: current directory].
    #[arg(short, long, value_name = "DIR")]
    base_dir: Option<Utf8PathBuf>,
}

fn main() {
    let cli = VersionCli::parse();
    // An unusable base directory leaves only the constant fallback.
    let version = match absolute_base_dir(cli.base_dir.as_deref()) {
        Ok(base_dir) => resolve_version_string(&SystemCommandExecutor, &base_dir).into_inner(),
        Err(err) => {
            eprintln!("warning: {err}");
            agentxcpp_release::version::UNKNOWN_VERSION.to_owned()
        }
    };
    println!("{version}");
}
