//! Service layer: the verification-and-matching pipeline.
//!
//! - `metadata_extractor`: diagnostic text -> `SignatureRecord`
//! - `commit_range`: commits unique to the child ref
//! - `signature_collector`: one verification per commit, lazily
//! - `contributor_registry`: trusted keys with MRU promotion
//! - `branch_validator`: accept/reject state machine
//! - `gate`: resolution plus validation for one proposed change

pub mod branch_validator;
pub mod commit_range;
pub mod contributor_registry;
pub mod gate;
pub mod metadata_extractor;
pub mod signature_collector;

pub use branch_validator::BranchValidator;
pub use commit_range::CommitRangeResolver;
pub use contributor_registry::ContributorRegistry;
pub use gate::SignatureGate;
pub use metadata_extractor::extract_signature;
pub use signature_collector::{CommitVerification, SignatureCollector};
