//! Branch validation.
//!
//! Walks the resolved commit range in order and decides whether every commit
//! is signed by a trusted contributor. The validator moves through
//! `Pending -> Evaluating(i) -> Accepted | Rejected`:
//!
//! - an unsigned commit, an untrusted key or a verification error rejects
//! - a trusted signature advances to the next commit
//! - running out of commits (including an empty range) accepts
//!
//! In [`ValidationMode::FailFast`] the first rejection ends the walk and no
//! further verification is launched. [`ValidationMode::Exhaustive`] keeps going
//! and reports every rejection.

use chrono::Utc;
use futures::StreamExt;
use std::pin::pin;
use tracing::{error, info, instrument};

use crate::domain::models::{
    CommitId, Rejection, RejectionReason, SignatureRecord, TrustedCommit, ValidationMode,
    ValidationReport, ValidationState, Verdict,
};
use crate::services::contributor_registry::ContributorRegistry;
use crate::services::signature_collector::{CommitVerification, SignatureCollector};

pub struct BranchValidator {
    collector: SignatureCollector,
    registry: ContributorRegistry,
    mode: ValidationMode,
    state: ValidationState,
}

impl BranchValidator {
    pub fn new(
        collector: SignatureCollector,
        registry: ContributorRegistry,
        mode: ValidationMode,
    ) -> Self {
        Self {
            collector,
            registry,
            mode,
            state: ValidationState::Pending,
        }
    }

    pub const fn state(&self) -> ValidationState {
        self.state
    }

    pub const fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Registry in its current order, MRU promotions included.
    pub const fn registry(&self) -> &ContributorRegistry {
        &self.registry
    }

    /// Validate `commits`, verifying them lazily in order.
    #[instrument(skip_all, fields(commits = commits.len(), mode = ?self.mode))]
    pub async fn validate(&mut self, commits: &[CommitId]) -> ValidationReport {
        self.state = ValidationState::Pending;

        let mut trusted = Vec::new();
        let mut rejections = Vec::new();
        let mut evaluated = 0;

        let mut verifications = pin!(self.collector.verifications(commits));
        while let Some(verification) = verifications.next().await {
            self.state = ValidationState::Evaluating(evaluated);
            evaluated += 1;

            match evaluate(&mut self.registry, verification) {
                Ok(commit) => {
                    info!(
                        commit = %commit.commit,
                        key_id = %commit.key_id,
                        contributor = %commit.contributor,
                        "commit signed by trusted contributor"
                    );
                    trusted.push(commit);
                }
                Err(rejection) => {
                    error!(
                        commit = %rejection.commit,
                        reason = rejection.reason.kind(),
                        "{}",
                        rejection.reason
                    );
                    rejections.push(rejection);
                    if self.mode == ValidationMode::FailFast {
                        break;
                    }
                }
            }
        }

        let verdict = if rejections.is_empty() {
            self.state = ValidationState::Accepted;
            Verdict::Accepted
        } else {
            self.state = ValidationState::Rejected;
            Verdict::Rejected
        };

        let skipped = commits.len() - evaluated;
        info!(%verdict, evaluated, skipped, "branch validation finished");

        ValidationReport {
            verdict,
            commits_in_range: commits.len(),
            trusted,
            rejections,
            skipped,
            checked_at: Utc::now(),
        }
    }
}

/// Decide a single commit against the registry.
fn evaluate(
    registry: &mut ContributorRegistry,
    verification: CommitVerification,
) -> Result<TrustedCommit, Rejection> {
    let CommitVerification { commit, outcome } = verification;

    let reason = match outcome {
        Ok(SignatureRecord::Signed(signature)) => match registry.match_signature(&signature) {
            Some(contributor) => {
                return Ok(TrustedCommit {
                    commit,
                    contributor: contributor.display_name().to_string(),
                    key_id: signature.key_id,
                    signer_name: signature.signer_name,
                });
            }
            None => RejectionReason::Untrusted {
                key_id: signature.key_id,
                signer_name: signature.signer_name,
                signer_email: signature.signer_email,
            },
        },
        Ok(SignatureRecord::Unsigned) => RejectionReason::Unsigned,
        Err(err) => RejectionReason::from(err),
    };

    Err(Rejection { commit, reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::git::{MockVersionControl, ScriptedVerification};
    use crate::domain::errors::SignatureField;
    use crate::domain::models::Contributor;
    use std::sync::Arc;

    fn commits(ids: &[&str]) -> Vec<CommitId> {
        ids.iter().map(|id| CommitId::new(*id)).collect()
    }

    fn validator(
        vcs: &Arc<MockVersionControl>,
        keys: &[&str],
        mode: ValidationMode,
    ) -> BranchValidator {
        let registry = ContributorRegistry::new(keys.iter().map(|k| Contributor::new(*k)).collect());
        BranchValidator::new(SignatureCollector::new(vcs.clone()), registry, mode)
    }

    #[tokio::test]
    async fn empty_range_is_accepted() {
        let vcs = Arc::new(MockVersionControl::new());
        let mut validator = validator(&vcs, &["A1"], ValidationMode::FailFast);
        assert_eq!(validator.state(), ValidationState::Pending);

        let report = validator.validate(&[]).await;

        assert!(report.is_accepted());
        assert_eq!(report.commits_in_range, 0);
        assert_eq!(validator.state(), ValidationState::Accepted);
        assert!(vcs.verified().is_empty());
    }

    #[tokio::test]
    async fn trusted_commits_are_accepted_and_promoted() {
        let vcs = Arc::new(
            MockVersionControl::new()
                .with_verification("c1", ScriptedVerification::signed("B2", "Bea", "bea@example.com"))
                .with_verification("c2", ScriptedVerification::signed("A1", "Ann", "ann@example.com")),
        );
        let mut validator = validator(&vcs, &["A1", "B2"], ValidationMode::FailFast);

        let report = validator.validate(&commits(&["c1", "c2"])).await;

        assert_eq!(report.verdict, Verdict::Accepted);
        assert_eq!(report.trusted.len(), 2);
        assert!(report.rejections.is_empty());
        assert_eq!(validator.registry().key_ids(), vec!["A1", "B2"]);
        assert_eq!(validator.state(), ValidationState::Accepted);
    }

    #[tokio::test]
    async fn promotion_happens_after_each_match() {
        let vcs = Arc::new(
            MockVersionControl::new()
                .with_verification("c1", ScriptedVerification::signed("C3", "Cy", "cy@example.com")),
        );
        let mut validator = validator(&vcs, &["A1", "B2", "C3"], ValidationMode::FailFast);

        validator.validate(&commits(&["c1"])).await;

        assert_eq!(validator.registry().key_ids(), vec!["C3", "A1", "B2"]);
    }

    #[tokio::test]
    async fn unsigned_commit_is_rejected() {
        let vcs = Arc::new(MockVersionControl::new().with_verification("c1", ScriptedVerification::Unsigned));
        let mut validator = validator(&vcs, &["A1"], ValidationMode::FailFast);

        let report = validator.validate(&commits(&["c1"])).await;

        assert_eq!(report.verdict, Verdict::Rejected);
        let rejection = report.first_rejection().unwrap();
        assert_eq!(rejection.commit.as_str(), "c1");
        assert_eq!(rejection.reason, RejectionReason::Unsigned);
        assert_eq!(validator.state(), ValidationState::Rejected);
    }

    #[tokio::test]
    async fn missing_key_line_is_extraction_error_not_unsigned() {
        let vcs = Arc::new(MockVersionControl::new().with_verification(
            "c1",
            ScriptedVerification::Raw {
                success: true,
                diagnostics: "gpg: Signature made Tue 10 Oct 2023 09:15:02 AM UTC\n\
                              gpg: Good signature from \"Ann <ann@example.com>\" [full]\n"
                    .to_string(),
            },
        ));
        let mut validator = validator(&vcs, &["A1"], ValidationMode::FailFast);

        let report = validator.validate(&commits(&["c1"])).await;

        let rejection = report.first_rejection().unwrap();
        match &rejection.reason {
            RejectionReason::ExtractionError { error } => {
                assert_eq!(error.field, SignatureField::KeyId);
            }
            other => panic!("expected extraction error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_key_is_untrusted() {
        let vcs = Arc::new(
            MockVersionControl::new()
                .with_verification("c1", ScriptedVerification::signed("ZZ", "Zed", "zed@example.com")),
        );
        let mut validator = validator(&vcs, &["A1", "B2"], ValidationMode::FailFast);

        let report = validator.validate(&commits(&["c1"])).await;

        assert_eq!(
            report.first_rejection().unwrap().reason,
            RejectionReason::Untrusted {
                key_id: "ZZ".to_string(),
                signer_name: "Zed".to_string(),
                signer_email: "zed@example.com".to_string(),
            }
        );
        assert_eq!(validator.registry().key_ids(), vec!["A1", "B2"]);
    }

    #[tokio::test]
    async fn fail_fast_skips_remaining_commits() {
        let vcs = Arc::new(
            MockVersionControl::new()
                .with_verification("c1", ScriptedVerification::signed("A1", "Ann", "ann@example.com"))
                .with_verification("c2", ScriptedVerification::Unsigned)
                .with_verification("c3", ScriptedVerification::signed("A1", "Ann", "ann@example.com")),
        );
        let mut validator = validator(&vcs, &["A1"], ValidationMode::FailFast);

        let report = validator.validate(&commits(&["c1", "c2", "c3"])).await;

        assert_eq!(report.verdict, Verdict::Rejected);
        assert_eq!(report.rejections.len(), 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(vcs.verified(), commits(&["c1", "c2"]));
    }

    #[tokio::test]
    async fn exhaustive_mode_reports_every_violation() {
        let vcs = Arc::new(
            MockVersionControl::new()
                .with_verification("c1", ScriptedVerification::Unsigned)
                .with_verification("c2", ScriptedVerification::signed("A1", "Ann", "ann@example.com"))
                .with_verification("c3", ScriptedVerification::signed("ZZ", "Zed", "zed@example.com")),
        );
        let mut validator = validator(&vcs, &["A1"], ValidationMode::Exhaustive);

        let report = validator.validate(&commits(&["c1", "c2", "c3"])).await;

        assert_eq!(report.verdict, Verdict::Rejected);
        assert_eq!(report.trusted.len(), 1);
        let kinds: Vec<&str> = report.rejections.iter().map(|r| r.reason.kind()).collect();
        assert_eq!(kinds, vec!["unsigned", "untrusted"]);
        assert_eq!(report.skipped, 0);
        assert_eq!(vcs.verified().len(), 3);
    }

    #[tokio::test]
    async fn launch_failure_and_timeout_reject() {
        let vcs = Arc::new(
            MockVersionControl::new()
                .with_verification("c1", ScriptedVerification::LaunchFailure("not found".into()))
                .with_verification("c2", ScriptedVerification::Timeout),
        );
        let mut validator = validator(&vcs, &["A1"], ValidationMode::Exhaustive);

        let report = validator.validate(&commits(&["c1", "c2"])).await;

        let kinds: Vec<&str> = report.rejections.iter().map(|r| r.reason.kind()).collect();
        assert_eq!(kinds, vec!["process_invocation_error", "verification_timeout"]);
        assert!(report.trusted.is_empty());
    }

    #[tokio::test]
    async fn empty_registry_rejects_signed_commit() {
        let vcs = Arc::new(
            MockVersionControl::new()
                .with_verification("c1", ScriptedVerification::signed("A1", "Ann", "ann@example.com")),
        );
        let mut validator = validator(&vcs, &[], ValidationMode::FailFast);

        let report = validator.validate(&commits(&["c1"])).await;
        assert_eq!(report.first_rejection().unwrap().reason.kind(), "untrusted");
    }
}
