//! Version-control port.

use async_trait::async_trait;

use crate::domain::errors::GateResult;
use crate::domain::models::CommitId;

/// Raw result of asking the version-control tool to verify one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutput {
    /// Whether the tool exited with a success status.
    pub success: bool,
    /// Exit code, if the process exited normally.
    pub exit_code: Option<i32>,
    /// Text the tool wrote to its diagnostic (error) stream.
    pub diagnostics: String,
}

impl VerificationOutput {
    pub fn succeeded(diagnostics: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            diagnostics: diagnostics.into(),
        }
    }

    pub fn failed(exit_code: i32, diagnostics: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: Some(exit_code),
            diagnostics: diagnostics.into(),
        }
    }
}

/// Interface to the repository holding the commits under review.
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Commits reachable from `child` and not from `parent`, newest first.
    ///
    /// Fails with `GateError::RangeResolution` when either ref or the
    /// repository itself is invalid.
    async fn resolve_range(&self, child: &str, parent: &str) -> GateResult<Vec<CommitId>>;

    /// Run signature verification for one commit.
    ///
    /// A commit without a valid signature is *not* an error here: it comes
    /// back as an output with `success == false`. Errors are reserved for
    /// launch failures and timeouts.
    async fn verify_commit(&self, commit: &CommitId) -> GateResult<VerificationOutput>;
}
