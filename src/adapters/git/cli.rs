//! Git command-line adapter.
//!
//! Spawns `git` to list the commits of a range and to verify commit
//! signatures. Every invocation is bounded by a timeout and the child process
//! is killed if the bound expires.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, instrument};

use crate::domain::errors::{GateError, GateResult};
use crate::domain::models::{CommitId, RepositoryConfig, VerificationConfig};
use crate::domain::ports::{VerificationOutput, VersionControl};

/// Git CLI adapter configuration.
#[derive(Debug, Clone)]
pub struct GitCliConfig {
    /// Path to the git binary
    pub binary_path: String,
    /// Working tree of the repository under review
    pub repository: PathBuf,
    /// Upper bound for each git invocation
    pub timeout: Duration,
}

impl Default for GitCliConfig {
    fn default() -> Self {
        Self {
            binary_path: "git".to_string(),
            repository: PathBuf::from("."),
            timeout: Duration::from_secs(30),
        }
    }
}

impl GitCliConfig {
    pub fn from_config(repository: &RepositoryConfig, verification: &VerificationConfig) -> Self {
        Self {
            binary_path: repository.git_binary.clone(),
            repository: PathBuf::from(&repository.path),
            timeout: Duration::from_secs(verification.timeout_secs),
        }
    }
}

/// Git CLI version-control adapter.
pub struct GitCli {
    config: GitCliConfig,
}

impl GitCli {
    pub fn new(config: GitCliConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GitCliConfig {
        &self.config
    }

    /// Base command: `git -C <repository>` with a fixed locale so gpg's
    /// wording does not depend on the CI host.
    fn git(&self) -> Command {
        let mut cmd = Command::new(&self.config.binary_path);
        cmd.arg("-C")
            .arg(&self.config.repository)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .kill_on_drop(true);
        cmd
    }

    fn range_args(child: &str, parent: &str) -> Vec<String> {
        vec![
            "log".to_string(),
            "--no-show-signature".to_string(),
            "--format=format:%H".to_string(),
            child.to_string(),
            format!("^{parent}"),
        ]
    }

    /// Refs are passed as positional arguments; anything that git could read
    /// as an option is refused.
    fn check_ref(child: &str, parent: &str, value: &str) -> GateResult<()> {
        if value.trim().is_empty() {
            return Err(GateError::range(child, parent, "ref name is empty"));
        }
        if value.starts_with('-') {
            return Err(GateError::range(
                child,
                parent,
                format!("ref name '{value}' looks like an option"),
            ));
        }
        Ok(())
    }

    fn parse_commit_list(stdout: &[u8]) -> Vec<CommitId> {
        String::from_utf8_lossy(stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(CommitId::new)
            .collect()
    }
}

#[async_trait]
impl VersionControl for GitCli {
    #[instrument(skip(self), fields(repository = %self.config.repository.display()))]
    async fn resolve_range(&self, child: &str, parent: &str) -> GateResult<Vec<CommitId>> {
        Self::check_ref(child, parent, child)?;
        Self::check_ref(child, parent, parent)?;

        if !self.config.repository.is_dir() {
            return Err(GateError::range(
                child,
                parent,
                format!(
                    "repository path {} is not a directory",
                    self.config.repository.display()
                ),
            ));
        }

        let mut cmd = self.git();
        cmd.args(Self::range_args(child, parent))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output: Output = tokio::time::timeout(self.config.timeout, cmd.output())
            .await
            .map_err(|_| {
                GateError::range(
                    child,
                    parent,
                    format!("git log did not finish within {:?}", self.config.timeout),
                )
            })?
            .map_err(|e| GateError::range(child, parent, format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GateError::range(child, parent, stderr.trim().to_string()));
        }

        let commits = Self::parse_commit_list(&output.stdout);
        info!(count = commits.len(), "resolved commit range");
        Ok(commits)
    }

    #[instrument(skip_all, fields(commit = %commit))]
    async fn verify_commit(&self, commit: &CommitId) -> GateResult<VerificationOutput> {
        let mut cmd = self.git();
        cmd.args(["verify-commit", commit.as_str()])
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let output = tokio::time::timeout(self.config.timeout, cmd.output())
            .await
            .map_err(|_| GateError::VerificationTimeout {
                commit: commit.clone(),
                timeout: self.config.timeout,
            })?
            .map_err(|e| GateError::ProcessInvocation {
                commit: commit.clone(),
                reason: e.to_string(),
            })?;

        debug!(status = ?output.status, "git verify-commit exited");

        Ok(VerificationOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            diagnostics: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
