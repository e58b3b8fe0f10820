//! Unit tests for the packaging pipeline using scripted git responses.

use super::*;
use crate::error::ReleaseError;
use crate::test_utils::{ExpectedCall, StubExecutor, failure_output, stdout_output};
use crate::version::VersionSource;
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Workspace {
    _dir: TempDir,
    config: ReleaseConfig,
}

#[fixture]
fn workspace() -> Workspace {
    let dir = TempDir::new().expect("temp dir creation succeeds");
    let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8 temp dir");
    Workspace {
        config: ReleaseConfig::new(&base),
        _dir: dir,
    }
}

fn base(config: &ReleaseConfig) -> &str {
    config.base_dir.as_str()
}

fn describe_call(config: &ReleaseConfig, stdout: &str) -> ExpectedCall {
    ExpectedCall::git(
        &["-C", base(config), "describe", "--always", "--dirty", "--tags"],
        Ok(stdout_output(stdout)),
    )
}

fn status_call(config: &ReleaseConfig, stdout: &str) -> ExpectedCall {
    ExpectedCall::git(
        &["-C", base(config), "status", "--porcelain"],
        Ok(stdout_output(stdout)),
    )
}

#[rstest]
fn plan_release_names_artefacts_after_version(workspace: Workspace) {
    let config = &workspace.config;
    let executor = StubExecutor::new(vec![
        describe_call(config, "1.0\n"),
        status_call(config, "?? notes.txt\n"),
    ]);

    let plan = plan_release(&executor, config).expect("plan succeeds");

    assert_eq!(plan.version().as_str(), "1.0");
    assert_eq!(plan.resolved.source, VersionSource::Describe);
    assert_eq!(plan.reference, "1.0");
    assert_eq!(plan.name.prefix(), "agentxcpp-1.0/");
    assert_eq!(plan.tgz_path, config.delivery_dir.join("agentxcpp-1.0.tgz"));
    assert_eq!(plan.zip_path, config.delivery_dir.join("agentxcpp-1.0.zip"));
    executor.assert_finished();
}

#[rstest]
fn plan_release_honours_reference_override(mut workspace: Workspace) {
    workspace.config.reference = Some("HEAD".to_owned());
    let config = &workspace.config;
    let executor = StubExecutor::new(vec![
        describe_call(config, "1.0-2-gabcdef0\n"),
        status_call(config, ""),
    ]);

    let plan = plan_release(&executor, config).expect("plan succeeds");

    assert_eq!(plan.reference, "HEAD");
    assert_eq!(plan.name.to_string(), "agentxcpp-1.0-2-gabcdef0");
}

#[rstest]
fn dirty_tree_leaves_delivery_directory_untouched(workspace: Workspace) {
    let config = &workspace.config;
    fs::create_dir_all(&config.delivery_dir).expect("mkdir deliv");
    let sentinel = config.delivery_dir.join("previous.tgz");
    fs::write(&sentinel, b"old artefact").expect("write sentinel");

    let executor = StubExecutor::new(vec![
        describe_call(config, "1.0-dirty\n"),
        status_call(config, " M src/oid.cpp\n"),
    ]);
    let mut sink = Vec::new();
    let mut reporter = Reporter::new(&mut sink, false);

    let err = package_release(&executor, config, &mut reporter).expect_err("gate fails");

    assert!(matches!(err, ReleaseError::DirtyRepository { .. }));
    assert_eq!(err.exit_code(), -1);
    assert!(sentinel.exists(), "delivery directory must not be touched");
    assert!(!config.base_dir.join("version").exists());
    executor.assert_finished();
}

#[rstest]
fn archive_failure_aborts_without_cleanup(workspace: Workspace) {
    let config = &workspace.config;
    let tar_path = config.delivery_dir.join("agentxcpp-1.0.tar");
    let executor = StubExecutor::new(vec![
        describe_call(config, "1.0\n"),
        status_call(config, ""),
        ExpectedCall::git(
            &[
                "-C",
                base(config),
                "archive",
                "--format=tar",
                "--prefix=agentxcpp-1.0/",
                "1.0",
                "-o",
                tar_path.as_str(),
            ],
            Ok(failure_output("fatal: not a valid object name: 1.0")),
        ),
    ]);
    let mut sink = Vec::new();
    let mut reporter = Reporter::new(&mut sink, false);

    let err = package_release(&executor, config, &mut reporter).expect_err("archive fails");

    assert!(matches!(err, ReleaseError::Git { operation: "archive", .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(config.delivery_dir.is_dir(), "delivery directory was recreated");
    assert_eq!(
        fs::read_to_string(config.base_dir.join("version")).expect("marker left behind"),
        "1.0\n"
    );
    executor.assert_finished();
}

#[rstest]
fn report_plan_lists_artefacts(workspace: Workspace) {
    let config = &workspace.config;
    let executor = StubExecutor::new(vec![describe_call(config, "2.1\n"), status_call(config, "")]);
    let plan = plan_release(&executor, config).expect("plan succeeds");

    let mut sink = Vec::new();
    report_plan(&plan, &mut Reporter::new(&mut sink, true));
    let text = String::from_utf8(sink).expect("UTF-8");

    assert!(text.contains("Dry run"));
    assert!(text.contains("Version: 2.1 (from git describe)"));
    assert!(text.contains("agentxcpp-2.1.tgz"));
    assert!(text.contains("agentxcpp-2.1.zip"));
    assert!(!config.delivery_dir.exists(), "dry run must not create directories");
}

#[rstest]
#[case::base_dir("")]
#[case::ancestor("..")]
#[case::git_dir(".git")]
fn overlapping_delivery_dir_is_rejected_before_git_runs(
    mut workspace: Workspace,
    #[case] dir: &str,
) {
    workspace.config.delivery_dir = workspace.config.base_dir.join(dir);
    let config = &workspace.config;
    let readme = config.base_dir.join("README");
    fs::write(&readme, b"agentxcpp").expect("write README");
    let executor = StubExecutor::new(Vec::new());
    let mut sink = Vec::new();
    let mut reporter = Reporter::new(&mut sink, false);

    let err = package_release(&executor, config, &mut reporter).expect_err("unsafe dir");

    assert!(matches!(err, ReleaseError::UnsafeDeliveryDir { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(readme.exists(), "source tree must survive");
    assert_eq!(executor.remaining(), 0);
}
