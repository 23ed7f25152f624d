//! Validation outcome types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use super::commit::CommitId;
use crate::domain::errors::{ExtractionError, GateError};

/// Progress of the branch validator over the resolved commit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum ValidationState {
    Pending,
    /// Evaluating the commit at this position of the range.
    Evaluating(usize),
    Accepted,
    Rejected,
}

impl ValidationState {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl Verdict {
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => f.write_str("accepted"),
            Self::Rejected => f.write_str("rejected"),
        }
    }
}

/// Why a commit disqualifies the branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionReason {
    /// The commit has no signature the tool could verify.
    Unsigned,
    /// Good signature, but the key belongs to no trusted contributor.
    Untrusted {
        key_id: String,
        signer_name: String,
        signer_email: String,
    },
    /// The tool claimed success but its output could not be read.
    ExtractionError { error: ExtractionError },
    ProcessInvocationError { message: String },
    VerificationTimeout {
        #[serde(rename = "timeout_secs", serialize_with = "serialize_secs")]
        timeout: Duration,
    },
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

impl RejectionReason {
    /// Stable identifier used in logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unsigned => "unsigned",
            Self::Untrusted { .. } => "untrusted",
            Self::ExtractionError { .. } => "extraction_error",
            Self::ProcessInvocationError { .. } => "process_invocation_error",
            Self::VerificationTimeout { .. } => "verification_timeout",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned => f.write_str("commit is not signed"),
            Self::Untrusted {
                key_id,
                signer_name,
                signer_email,
            } => write!(
                f,
                "signed by {signer_name} <{signer_email}> with key {key_id}, which is not a trusted contributor"
            ),
            Self::ExtractionError { error } => write!(f, "unexpected verification output: {error}"),
            Self::ProcessInvocationError { message } => {
                write!(f, "verification could not run: {message}")
            }
            Self::VerificationTimeout { timeout } => {
                write!(f, "verification did not finish within {timeout:?}")
            }
        }
    }
}

impl From<GateError> for RejectionReason {
    fn from(err: GateError) -> Self {
        match err {
            GateError::Extraction { source, .. } => Self::ExtractionError { error: source },
            GateError::VerificationTimeout { timeout, .. } => Self::VerificationTimeout { timeout },
            GateError::ProcessInvocation { reason, .. } => {
                Self::ProcessInvocationError { message: reason }
            }
            other => Self::ProcessInvocationError {
                message: other.to_string(),
            },
        }
    }
}

/// A commit that disqualified the branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub commit: CommitId,
    pub reason: RejectionReason,
}

/// A commit signed by a trusted contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrustedCommit {
    pub commit: CommitId,
    pub key_id: String,
    pub signer_name: String,
    pub contributor: String,
}

/// Result of validating one commit range.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub verdict: Verdict,
    pub commits_in_range: usize,
    pub trusted: Vec<TrustedCommit>,
    pub rejections: Vec<Rejection>,
    /// Commits never verified because evaluation stopped early.
    pub skipped: usize,
    pub checked_at: DateTime<Utc>,
}

impl ValidationReport {
    pub fn is_accepted(&self) -> bool {
        self.verdict.is_accepted()
    }

    pub fn first_rejection(&self) -> Option<&Rejection> {
        self.rejections.first()
    }
}
