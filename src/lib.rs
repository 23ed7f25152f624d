//! Commit Warden - signed-commit gate for CI
//!
//! Commit Warden inspects every commit a proposed branch adds over its
//! destination and accepts the branch only if each commit carries a good
//! signature from a key belonging to a trusted contributor.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and the ports to git and the
//!   contributor store
//! - **Service Layer** (`services`): range resolution, signature extraction,
//!   the move-to-front contributor registry and the branch validator
//! - **Adapters** (`adapters`): the git CLI and the contributor directory
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use commit_warden::adapters::git::{GitCli, GitCliConfig};
//! use commit_warden::domain::models::{Contributor, ValidationMode};
//! use commit_warden::services::SignatureGate;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let gate = SignatureGate::new(
//!         Arc::new(GitCli::new(GitCliConfig::default())),
//!         ValidationMode::FailFast,
//!     );
//!     let report = gate
//!         .check("feature", "main", vec![Contributor::new("4AEE18F83AFDEB23")])
//!         .await?;
//!     println!("{}", report.verdict);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{ExtractionError, GateError, GateResult};
pub use domain::models::{
    CommitId, Config, Contributor, SignatureClass, SignatureRecord, SignedCommit,
    ValidationMode, ValidationReport, Verdict,
};
pub use domain::ports::{ContributorSource, VerificationOutput, VersionControl};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{BranchValidator, ContributorRegistry, SignatureGate, extract_signature};
