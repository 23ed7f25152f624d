//! Port trait definitions (Hexagonal Architecture)
//!
//! - `VersionControl`: commit range queries and signature verification
//! - `ContributorSource`: loading the trusted contributor list

pub mod contributor_source;
pub mod version_control;

pub use contributor_source::ContributorSource;
pub use version_control::{VerificationOutput, VersionControl};
