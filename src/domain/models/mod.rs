pub mod commit;
pub mod config;
pub mod contributor;
pub mod signature;
pub mod verdict;

pub use commit::CommitId;
pub use config::{
    Config, ContributorsConfig, LoggingConfig, RepositoryConfig, ValidationMode,
    VerificationConfig,
};
pub use contributor::Contributor;
pub use signature::{SignatureClass, SignatureRecord, SignedCommit};
pub use verdict::{
    Rejection, RejectionReason, TrustedCommit, ValidationReport, ValidationState, Verdict,
};
