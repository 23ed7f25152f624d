//! Common test utilities for integration tests
//!
//! Temporary git repositories, fake `git` executables and contributor
//! directories shared across the integration test files.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Run git in `path` and return its trimmed stdout, failing the test on a
/// non-zero exit.
pub fn git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .env("LC_ALL", "C")
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Setup a git repository in a temp directory for testing
///
/// Creates an initialized repo on branch `main` with one unsigned empty
/// commit. `_dir` must be kept alive to prevent cleanup.
pub fn setup_test_git_repo() -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let path = dir.path().to_path_buf();

    git(&path, &["init", "-q"]);
    git(&path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(&path, &["config", "user.email", "test@test.com"]);
    git(&path, &["config", "user.name", "Test User"]);
    git(&path, &["config", "commit.gpgsign", "false"]);
    commit_empty(&path, "initial commit");

    (dir, path)
}

/// Create an empty commit on the current branch and return its id.
pub fn commit_empty(path: &Path, message: &str) -> String {
    git(path, &["commit", "-q", "--allow-empty", "-m", message]);
    git(path, &["rev-parse", "HEAD"])
}

/// Write an executable shell script standing in for git.
///
/// The gate invokes `<git> -C <repo> log ...` and
/// `<git> -C <repo> verify-commit <sha>`, so `$3` is the subcommand and `$4`
/// the commit.
#[cfg(unix)]
pub fn write_fake_git(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-git");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write fake git");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake git executable");
    path
}

/// gpg-style diagnostics for a good signature, as a heredoc-safe string.
pub fn good_signature(key_id: &str, name: &str, email: &str) -> String {
    format!(
        "gpg: Signature made Tue 10 Oct 2023 09:15:02 AM UTC\n\
         gpg:                using RSA key {key_id}\n\
         gpg: Good signature from \"{name} <{email}>\" [ultimate]"
    )
}

/// Create a contributor directory holding one YAML record per `(key, name)`.
pub fn contributor_dir(records: &[(&str, &str)]) -> TempDir {
    let dir = temp_dir();
    for (index, (key_id, name)) in records.iter().enumerate() {
        fs::write(
            dir.path().join(format!("{index:02}-{name}.yaml")),
            format!("key_id: {key_id}\nname: {name}\n"),
        )
        .expect("Failed to write contributor record");
    }
    dir
}
