//! Test support utilities for release packaging tests.
//!
//! Provides throwaway git repositories and readers for the produced `.tgz`
//! and `.zip` artefacts.

#![allow(dead_code, reason = "each test binary uses a subset of helpers")]

use camino::{Utf8Path, Utf8PathBuf};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::Read;
use std::process::Command;
use tempfile::TempDir;

/// Checks if git is available on the host system.
pub fn is_git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A scratch git repository with a committer identity configured locally.
pub struct GitRepo {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl GitRepo {
    /// Initialises an empty repository in a fresh temporary directory.
    pub fn init() -> Self {
        let dir = TempDir::new().expect("temp dir creation succeeds");
        let root =
            Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8 temp dir path");
        let repo = Self { _dir: dir, root };
        repo.git(&["init", "--quiet"]);
        repo.git(&["config", "user.name", "Release Tests"]);
        repo.git(&["config", "user.email", "release-tests@example.invalid"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo.git(&["config", "tag.gpgsign", "false"]);
        repo
    }

    /// A repository holding a small source tree committed and tagged `tag`.
    pub fn tagged(tag: &str) -> Self {
        let repo = Self::init();
        repo.write("README", "agentxcpp\n");
        repo.write("src/oid.cpp", "int main() { return 0; }\n");
        repo.commit_all("Initial import");
        repo.git(&["tag", tag]);
        repo
    }

    /// Root of the working tree.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Writes `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(path, contents).expect("write repository file");
    }

    /// Stages everything and commits it.
    pub fn commit_all(&self, message: &str) {
        self.git(&["add", "--all"]);
        self.git(&["commit", "--quiet", "-m", message]);
    }

    /// Runs git in the repository and asserts success.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .arg("-C")
            .arg(self.root.as_str())
            .args(args)
            .output()
            .expect("git spawns");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("git output is UTF-8")
    }
}

/// Member paths of a gzip-compressed tar, in archive order.
pub fn tgz_member_names(path: &Utf8Path) -> Vec<String> {
    let file = File::open(path).expect("open tgz");
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    archive
        .entries()
        .expect("tar entries")
        .map(|entry| {
            let entry = entry.expect("tar entry");
            let path = entry.path().expect("tar entry path");
            path.to_string_lossy().into_owned()
        })
        .collect()
}

/// Contents of the last member named `member` in a gzip-compressed tar.
pub fn tgz_member(path: &Utf8Path, member: &str) -> Option<String> {
    let file = File::open(path).expect("open tgz");
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    let mut found = None;
    for entry in archive.entries().expect("tar entries") {
        let mut entry = entry.expect("tar entry");
        if entry.path().expect("tar entry path").to_string_lossy() == member {
            let mut contents = String::new();
            entry.read_to_string(&mut contents).expect("read tar member");
            found = Some(contents);
        }
    }
    found
}

/// Member names of a zip archive, in central directory order.
pub fn zip_member_names(path: &Utf8Path) -> Vec<String> {
    let file = File::open(path).expect("open zip");
    let archive = zip::ZipArchive::new(file).expect("valid zip");
    archive.file_names().map(str::to_owned).collect::<Vec<_>>()
}

/// Contents of `member` in a zip archive.
pub fn zip_member(path: &Utf8Path, member: &str) -> Option<String> {
    let file = File::open(path).expect("open zip");
    let mut archive = zip::ZipArchive::new(file).expect("valid zip");
    let mut entry = archive.by_name(member).ok()?;
    let mut contents = String::new();
    entry.read_to_string(&mut contents).expect("read zip member");
    Some(contents)
}

/// Sorted file names directly inside `dir`.
pub fn dir_listing(dir: &Utf8Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read directory")
        .map(|entry| {
            entry
                .expect("directory entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}
