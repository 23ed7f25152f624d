//! End-to-end signature gate.
//!
//! Resolves the commit range of a proposed change and validates it against
//! the trusted contributor list.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::errors::GateResult;
use crate::domain::models::{Contributor, ValidationMode, ValidationReport};
use crate::domain::ports::VersionControl;
use crate::services::branch_validator::BranchValidator;
use crate::services::commit_range::CommitRangeResolver;
use crate::services::contributor_registry::ContributorRegistry;
use crate::services::signature_collector::SignatureCollector;

pub struct SignatureGate {
    vcs: Arc<dyn VersionControl>,
    mode: ValidationMode,
}

impl SignatureGate {
    pub fn new(vcs: Arc<dyn VersionControl>, mode: ValidationMode) -> Self {
        Self { vcs, mode }
    }

    /// Check every commit `source` adds on top of `destination`.
    ///
    /// Only range resolution errors are returned as `Err`; per-commit
    /// problems are rejections inside the report.
    #[instrument(skip(self, contributors), fields(contributors = contributors.len()))]
    pub async fn check(
        &self,
        source: &str,
        destination: &str,
        contributors: Vec<Contributor>,
    ) -> GateResult<ValidationReport> {
        let commits = CommitRangeResolver::new(self.vcs.clone())
            .resolve(source, destination)
            .await?;
        info!(commits = commits.len(), "validating commit range");

        let mut validator = BranchValidator::new(
            SignatureCollector::new(self.vcs.clone()),
            ContributorRegistry::new(contributors),
            self.mode,
        );
        Ok(validator.validate(&commits).await)
    }
}
