//! Release packaging pipeline.
//!
//! A run resolves the version, refuses to continue on a dirty tree, then
//! recreates the delivery directory and produces the `.tgz` and `.zip`
//! artefacts, each carrying the version marker under the archive prefix.
//! Failures after the cleanliness gate abort the run without cleanup.

use crate::artefact::naming::ArtefactName;
use crate::artefact::{tarball, zipfile};
use crate::config::{ReleaseConfig, check_delivery_dir};
use crate::error::Result;
use crate::exec::CommandExecutor;
use crate::git::{self, ArchiveFormat, ArchiveRequest};
use crate::marker::VersionMarker;
use crate::output::{Reporter, success_message};
use crate::status::check_clean;
use crate::version::{ResolvedVersion, VersionString, resolve_version};
use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use std::fs;

/// Everything decided before the filesystem is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    /// The resolved version and its source.
    pub resolved: ResolvedVersion,
    /// Stem, prefix, and file names of the artefacts.
    pub name: ArtefactName,
    /// Git reference passed to `git archive`.
    pub reference: String,
    /// Directory that will hold the artefacts.
    pub delivery_dir: Utf8PathBuf,
    /// Destination of the compressed tar artefact.
    pub tgz_path: Utf8PathBuf,
    /// Destination of the zip artefact.
    pub zip_path: Utf8PathBuf,
}

impl ReleasePlan {
    /// The resolved version string.
    #[must_use]
    pub fn version(&self) -> &VersionString {
        &self.resolved.version
    }
}

/// Artefacts produced by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutput {
    /// The packaged version.
    pub version: VersionString,
    /// Directory holding the artefacts.
    pub delivery_dir: Utf8PathBuf,
    /// Path to the `.tgz` artefact.
    pub tgz_path: Utf8PathBuf,
    /// Path to the `.zip` artefact.
    pub zip_path: Utf8PathBuf,
}

/// Resolves the version and passes the cleanliness gate.
///
/// Performs no filesystem writes, so it also backs dry runs.
///
/// # Errors
///
/// Returns [`crate::error::ReleaseError::UnsafeDeliveryDir`] before running
/// git if the delivery directory overlaps the checkout, and
/// [`crate::error::ReleaseError::DirtyRepository`] or
/// [`crate::error::ReleaseError::RepositoryStateUnknown`] when the gate fails.
pub fn plan_release(executor: &dyn CommandExecutor, config: &ReleaseConfig) -> Result<ReleasePlan> {
    check_delivery_dir(&config.base_dir, &config.delivery_dir)?;
    let resolved = resolve_version(executor, &config.base_dir);
    check_clean(executor, &config.base_dir)?;

    let name = ArtefactName::new(&config.product, resolved.version.clone());
    let reference = config.reference_for(resolved.version.as_str()).to_owned();
    Ok(ReleasePlan {
        tgz_path: config.delivery_dir.join(name.tgz_filename()),
        zip_path: config.delivery_dir.join(name.zip_filename()),
        delivery_dir: config.delivery_dir.clone(),
        resolved,
        name,
        reference,
    })
}

/// Runs the full packaging pipeline.
///
/// # Errors
///
/// Returns a gate error before any filesystem mutation, or any git, I/O, or
/// archive error raised while producing the artefacts. Artefacts already
/// written and the marker file are left in place on failure.
pub fn package_release(
    executor: &dyn CommandExecutor,
    config: &ReleaseConfig,
    reporter: &mut Reporter<'_>,
) -> Result<PackageOutput> {
    let plan = plan_release(executor, config)?;
    build_release(executor, config, &plan, reporter)
}

/// Produces the artefacts described by `plan`.
///
/// # Errors
///
/// Returns any git, I/O, or archive error; nothing is rolled back.
pub fn build_release(
    executor: &dyn CommandExecutor,
    config: &ReleaseConfig,
    plan: &ReleasePlan,
    reporter: &mut Reporter<'_>,
) -> Result<PackageOutput> {
    reset_delivery_dir(&plan.delivery_dir, reporter)?;
    let marker = VersionMarker::create(&config.base_dir, plan.version())?;

    reporter.progress("Creating tar file...");
    create_tgz(executor, config, plan, &marker)?;

    reporter.progress("Creating zip file...");
    create_zip(executor, config, plan, &marker)?;

    marker.remove()?;

    reporter.progress("");
    reporter.progress(success_message(plan.version().as_str(), &plan.delivery_dir));

    Ok(PackageOutput {
        version: plan.version().clone(),
        delivery_dir: plan.delivery_dir.clone(),
        tgz_path: plan.tgz_path.clone(),
        zip_path: plan.zip_path.clone(),
    })
}

/// Writes a description of `plan` without touching the filesystem.
pub fn report_plan(plan: &ReleasePlan, reporter: &mut Reporter<'_>) {
    reporter.line("Dry run - no files will be modified");
    reporter.line("");
    reporter.line(format!(
        "Version: {} (from {})",
        plan.version(),
        plan.resolved.source
    ));
    reporter.line(format!("Reference: {}", plan.reference));
    reporter.line(format!("Archive prefix: {}", plan.name.prefix()));
    reporter.line(format!("Delivery directory: {}", plan.delivery_dir));
    reporter.line(format!("  - {}", plan.tgz_path));
    reporter.line(format!("  - {}", plan.zip_path));
}

/// Removes `dir` if present and creates it empty.
fn reset_delivery_dir(dir: &Utf8Path, reporter: &mut Reporter<'_>) -> Result<()> {
    if dir.exists() {
        reporter.progress(format!("Deleting {dir}/"));
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

fn create_tgz(
    executor: &dyn CommandExecutor,
    config: &ReleaseConfig,
    plan: &ReleasePlan,
    marker: &VersionMarker,
) -> Result<()> {
    let tar_path = plan.delivery_dir.join(plan.name.tar_filename());
    let prefix = plan.name.prefix();
    git::archive(
        executor,
        &config.base_dir,
        ArchiveRequest {
            format: ArchiveFormat::Tar,
            prefix: &prefix,
            reference: &plan.reference,
            output: &tar_path,
        },
    )?;

    tarball::append_file(
        tar_path.as_std_path(),
        marker.path().as_std_path(),
        &plan.name.marker_member(),
    )?;
    tarball::gzip_and_remove(tar_path.as_std_path(), plan.tgz_path.as_std_path())?;
    info!("created {}", plan.tgz_path);
    Ok(())
}

fn create_zip(
    executor: &dyn CommandExecutor,
    config: &ReleaseConfig,
    plan: &ReleasePlan,
    marker: &VersionMarker,
) -> Result<()> {
    let prefix = plan.name.prefix();
    git::archive(
        executor,
        &config.base_dir,
        ArchiveRequest {
            format: ArchiveFormat::Zip,
            prefix: &prefix,
            reference: &plan.reference,
            output: &plan.zip_path,
        },
    )?;

    zipfile::append_file(
        plan.zip_path.as_std_path(),
        marker.path().as_std_path(),
        &plan.name.marker_member(),
    )?;
    info!("created {}", plan.zip_path);
    Ok(())
}

#[cfg(test)]
#[path = "packager_tests.rs"]
mod tests;
