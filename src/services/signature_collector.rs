//! Signature collection.
//!
//! Runs one verification per commit, in range order, and hands each result's
//! diagnostic text to the metadata extractor. Results come out of a lazy
//! stream: a verification is only launched when the consumer asks for the
//! next item, so a consumer that stops early never verifies later commits.

use futures::stream::{self, Stream, StreamExt};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::domain::errors::{GateError, GateResult};
use crate::domain::models::{CommitId, SignatureRecord};
use crate::domain::ports::VersionControl;
use crate::services::metadata_extractor::extract_signature;

/// Verification result for a single commit.
#[derive(Debug)]
pub struct CommitVerification {
    pub commit: CommitId,
    pub outcome: GateResult<SignatureRecord>,
}

pub struct SignatureCollector {
    vcs: Arc<dyn VersionControl>,
}

impl SignatureCollector {
    pub fn new(vcs: Arc<dyn VersionControl>) -> Self {
        Self { vcs }
    }

    /// Verify one commit.
    ///
    /// Launch failures, timeouts and malformed output all end up in
    /// `outcome` as errors; nothing here stops the caller from moving on to
    /// the next commit.
    #[instrument(skip_all, fields(commit = %commit))]
    pub async fn verify(&self, commit: &CommitId) -> CommitVerification {
        let outcome = match self.vcs.verify_commit(commit).await {
            Ok(output) => {
                debug!(
                    success = output.success,
                    exit_code = ?output.exit_code,
                    diagnostics = %output.diagnostics.trim_end(),
                    "verification finished"
                );
                extract_signature(commit, &output).map_err(|source| GateError::Extraction {
                    commit: commit.clone(),
                    source,
                })
            }
            Err(err) => Err(err),
        };

        if let Err(err) = &outcome {
            warn!(error = %err, "could not establish commit signature");
        }

        CommitVerification {
            commit: commit.clone(),
            outcome,
        }
    }

    /// Lazily verify `commits` one after another, in order.
    pub fn verifications<'a>(
        &'a self,
        commits: &'a [CommitId],
    ) -> impl Stream<Item = CommitVerification> + 'a {
        stream::iter(commits).then(move |commit| self.verify(commit))
    }
}
