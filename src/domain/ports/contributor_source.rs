//! Contributor source port.

use async_trait::async_trait;

use crate::domain::errors::GateResult;
use crate::domain::models::Contributor;

/// Supplies the trusted contributor list once per run.
#[async_trait]
pub trait ContributorSource: Send + Sync {
    async fn load(&self) -> GateResult<Vec<Contributor>>;
}
