//! Signature metadata extracted from a commit verification.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::commit::CommitId;

/// Trust annotation printed in brackets after a good signature,
/// e.g. `[ultimate]` or `[unknown]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureClass {
    Ultimate,
    Full,
    Marginal,
    Never,
    Unknown,
    Undefined,
    Expired,
    Revoked,
    /// Annotation not known to this crate, carried verbatim.
    Other(String),
}

impl SignatureClass {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ultimate => "ultimate",
            Self::Full => "full",
            Self::Marginal => "marginal",
            Self::Never => "never",
            Self::Unknown => "unknown",
            Self::Undefined => "undefined",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
            Self::Other(s) => s,
        }
    }

    /// Parse an annotation. Never fails: unrecognised words become `Other`.
    pub fn parse(annotation: &str) -> Self {
        match annotation.trim().to_lowercase().as_str() {
            "ultimate" => Self::Ultimate,
            "full" => Self::Full,
            "marginal" => Self::Marginal,
            "never" => Self::Never,
            "unknown" => Self::Unknown,
            "undefined" => Self::Undefined,
            "expired" => Self::Expired,
            "revoked" => Self::Revoked,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SignatureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A commit carrying a good signature, with every field the verification
/// tool reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedCommit {
    pub commit_id: CommitId,
    /// Timestamp exactly as emitted by the tool.
    pub signed_at: String,
    pub key_id: String,
    pub signer_name: String,
    pub signer_email: String,
    pub signature_class: SignatureClass,
}

/// Outcome of reading one commit's verification output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SignatureRecord {
    /// The tool could not verify a signature on the commit.
    Unsigned,
    Signed(SignedCommit),
}

impl SignatureRecord {
    pub fn is_signed(&self) -> bool {
        matches!(self, Self::Signed(_))
    }

    pub fn as_signed(&self) -> Option<&SignedCommit> {
        match self {
            Self::Signed(signed) => Some(signed),
            Self::Unsigned => None,
        }
    }
}
