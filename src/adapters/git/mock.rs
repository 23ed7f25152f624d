//! Mock version control for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::errors::{GateError, GateResult};
use crate::domain::models::CommitId;
use crate::domain::ports::{VerificationOutput, VersionControl};

/// Scripted result of verifying one commit.
#[derive(Debug, Clone)]
pub enum ScriptedVerification {
    /// Good signature; the mock renders gpg-style diagnostics for it.
    Signed {
        key_id: String,
        name: String,
        email: String,
        class: String,
    },
    /// `verify-commit` exits with status 1.
    Unsigned,
    /// Exact status and diagnostic text.
    Raw { success: bool, diagnostics: String },
    /// The process cannot be launched.
    LaunchFailure(String),
    /// The process does not finish within its bound.
    Timeout,
}

impl ScriptedVerification {
    pub fn signed(key_id: &str, name: &str, email: &str) -> Self {
        Self::Signed {
            key_id: key_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            class: "full".to_string(),
        }
    }
}

/// Render the diagnostics gpg prints for a good signature.
pub fn good_signature_diagnostics(key_id: &str, name: &str, email: &str, class: &str) -> String {
    format!(
        "gpg: Signature made Tue 10 Oct 2023 09:15:02 AM UTC\n\
         gpg:                using RSA key {key_id}\n\
         gpg: Good signature from \"{name} <{email}>\" [{class}]\n"
    )
}

/// Mock version control with scripted ranges and verifications.
///
/// Unscripted commits verify as unsigned. Unscripted ranges resolve to an
/// empty list when child and parent are the same ref and fail otherwise.
/// Every verification request is recorded, in order.
#[derive(Default)]
pub struct MockVersionControl {
    ranges: HashMap<(String, String), Vec<CommitId>>,
    verifications: HashMap<CommitId, ScriptedVerification>,
    verified: Mutex<Vec<CommitId>>,
}

impl MockVersionControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, child: &str, parent: &str, commits: &[&str]) -> Self {
        self.ranges.insert(
            (child.to_string(), parent.to_string()),
            commits.iter().map(|c| CommitId::new(*c)).collect(),
        );
        self
    }

    pub fn with_verification(mut self, commit: &str, verification: ScriptedVerification) -> Self {
        self.verifications.insert(CommitId::new(commit), verification);
        self
    }

    /// Commits passed to `verify_commit` so far.
    pub fn verified(&self) -> Vec<CommitId> {
        self.verified
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl VersionControl for MockVersionControl {
    async fn resolve_range(&self, child: &str, parent: &str) -> GateResult<Vec<CommitId>> {
        if let Some(commits) = self.ranges.get(&(child.to_string(), parent.to_string())) {
            return Ok(commits.clone());
        }
        if child == parent {
            return Ok(Vec::new());
        }
        Err(GateError::range(child, parent, "unknown revision"))
    }

    async fn verify_commit(&self, commit: &CommitId) -> GateResult<VerificationOutput> {
        if let Ok(mut calls) = self.verified.lock() {
            calls.push(commit.clone());
        }

        match self.verifications.get(commit) {
            Some(ScriptedVerification::Signed {
                key_id,
                name,
                email,
                class,
            }) => Ok(VerificationOutput::succeeded(good_signature_diagnostics(
                key_id, name, email, class,
            ))),
            Some(ScriptedVerification::Raw {
                success,
                diagnostics,
            }) => Ok(VerificationOutput {
                success: *success,
                exit_code: Some(i32::from(!*success)),
                diagnostics: diagnostics.clone(),
            }),
            Some(ScriptedVerification::LaunchFailure(reason)) => {
                Err(GateError::ProcessInvocation {
                    commit: commit.clone(),
                    reason: reason.clone(),
                })
            }
            Some(ScriptedVerification::Timeout) => Err(GateError::VerificationTimeout {
                commit: commit.clone(),
                timeout: Duration::from_secs(30),
            }),
            Some(ScriptedVerification::Unsigned) | None => Ok(VerificationOutput::failed(
                1,
                format!("error: no signature found on commit {commit}\n"),
            )),
        }
    }
}
