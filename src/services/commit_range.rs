//! Commit range resolution.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::errors::GateResult;
use crate::domain::models::CommitId;
use crate::domain::ports::VersionControl;

/// Lists the commits a proposed change introduces: everything reachable from
/// the child ref that is not in the parent ref's history.
pub struct CommitRangeResolver {
    vcs: Arc<dyn VersionControl>,
}

impl CommitRangeResolver {
    pub fn new(vcs: Arc<dyn VersionControl>) -> Self {
        Self { vcs }
    }

    /// Commits unique to `child`, newest first. An empty range is not an error.
    #[instrument(skip(self))]
    pub async fn resolve(&self, child: &str, parent: &str) -> GateResult<Vec<CommitId>> {
        let commits = self.vcs.resolve_range(child, parent).await?;
        if commits.is_empty() {
            info!("no commits to verify");
        }
        Ok(commits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::git::MockVersionControl;
    use crate::domain::errors::GateError;

    #[tokio::test]
    async fn same_ref_resolves_to_empty_range() {
        let resolver = CommitRangeResolver::new(Arc::new(MockVersionControl::new()));
        let commits = resolver.resolve("main", "main").await.unwrap();
        assert!(commits.is_empty());
    }

    #[tokio::test]
    async fn keeps_tool_order() {
        let vcs = MockVersionControl::new().with_range("feature", "main", &["c3", "c2", "c1"]);
        let resolver = CommitRangeResolver::new(Arc::new(vcs));

        let commits = resolver.resolve("feature", "main").await.unwrap();
        let ids: Vec<&str> = commits.iter().map(CommitId::as_str).collect();
        assert_eq!(ids, vec!["c3", "c2", "c1"]);
    }

    #[tokio::test]
    async fn unknown_ref_is_range_error() {
        let resolver = CommitRangeResolver::new(Arc::new(MockVersionControl::new()));
        let err = resolver.resolve("nope", "main").await.unwrap_err();
        assert!(matches!(err, GateError::RangeResolution { .. }));
    }
}
