//! CLI argument definitions for the release packager.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use crate::config::ConfigOverrides;
use camino::Utf8PathBuf;
use clap::Parser;

/// Package a tagged agentxcpp tree into .tgz and .zip archives.
#[derive(Parser, Debug, Default)]
#[command(name = "agentxcpp-release")]
#[command(version, about)]
#[command(long_about = concat!(
    "Package a tagged agentxcpp tree into .tgz and .zip archives.\n\n",
    "The version is taken from `git describe --always --dirty --tags`, falling ",
    "back to the `version` file in the base directory and finally to \"unknown\". ",
    "The run refuses to start if tracked files are modified or staged; untracked ",
    "files are ignored.\n\n",
    "Both archives contain the tree under `<product>-<version>/` together with ",
    "a `version` file holding the version string.",
))]
#[command(after_help = concat!(
    "EXIT STATUS:\n",
    "  0     Artefacts were created\n",
    "  255   The repository is dirty or its state could not be determined\n",
    "  1     Any other failure\n\n",
    "EXAMPLES:\n",
    "  Package the current checkout:\n",
    "    $ agentxcpp-release\n\n",
    "  Package a checkout elsewhere into a custom directory:\n",
    "    $ agentxcpp-release --base-dir ~/src/agentxcpp --delivery-dir /tmp/deliv\n\n",
    "  Preview without writing anything:\n",
    "    $ agentxcpp-release --dry-run",
))]
pub struct Cli {
    /// Root of the source tree [default: current directory].
    #[arg(short, long, value_name = "DIR")]
    pub base_dir: Option<Utf8PathBuf>,

    /// Directory receiving the artefacts; deleted and recreated on every run
    /// [default: BASE_DIR/deliv].
    #[arg(short, long, value_name = "DIR")]
    pub delivery_dir: Option<Utf8PathBuf>,

    /// Product name used in artefact names [default: agentxcpp].
    #[arg(short, long, value_name = "NAME")]
    pub product: Option<String>,

    /// Git reference to archive [default: the resolved version].
    #[arg(short, long, value_name = "REF")]
    pub reference: Option<String>,

    /// Check the repository and show the planned artefacts without writing.
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Configuration values given on the command line.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            product: self.product.clone(),
            delivery_dir: self.delivery_dir.clone(),
            reference: self.reference.clone(),
        }
    }
}
