//! Domain errors for the commit signature gate.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use super::models::CommitId;

/// A piece of signature metadata the verification output must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureField {
    SignedAt,
    KeyId,
    SignerName,
    SignerEmail,
    SignatureClass,
}

impl fmt::Display for SignatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SignedAt => "signature timestamp",
            Self::KeyId => "key identifier",
            Self::SignerName => "signer name",
            Self::SignerEmail => "signer email",
            Self::SignatureClass => "signature class annotation",
        };
        f.write_str(label)
    }
}

/// Verification reported success but its output did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("verification output has no {field}")]
pub struct ExtractionError {
    pub field: SignatureField,
}

impl ExtractionError {
    pub const fn missing(field: SignatureField) -> Self {
        Self { field }
    }
}

/// Errors raised while evaluating a branch.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("cannot resolve commits of '{child}' missing from '{parent}': {reason}")]
    RangeResolution {
        child: String,
        parent: String,
        reason: String,
    },

    #[error("could not launch verification of commit {commit}: {reason}")]
    ProcessInvocation { commit: CommitId, reason: String },

    #[error("verification of commit {commit} did not finish within {timeout:?}")]
    VerificationTimeout { commit: CommitId, timeout: Duration },

    #[error("unexpected verification output for commit {commit}: {source}")]
    Extraction {
        commit: CommitId,
        #[source]
        source: ExtractionError,
    },

    #[error("invalid contributor record {path}: {reason}")]
    ContributorLoad { path: PathBuf, reason: String },
}

pub type GateResult<T> = Result<T, GateError>;

impl GateError {
    pub fn range(
        child: impl Into<String>,
        parent: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::RangeResolution {
            child: child.into(),
            parent: parent.into(),
            reason: reason.into(),
        }
    }

    pub fn contributor_load(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::ContributorLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_error_names_field() {
        let err = ExtractionError::missing(SignatureField::KeyId);
        assert_eq!(err.to_string(), "verification output has no key identifier");
    }

    #[test]
    fn timeout_message_includes_bound() {
        let err = GateError::VerificationTimeout {
            commit: CommitId::new("c1"),
            timeout: Duration::from_secs(30),
        };
        assert_eq!(
            err.to_string(),
            "verification of commit c1 did not finish within 30s"
        );
    }
}
