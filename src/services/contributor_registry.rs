//! Trusted contributor registry.
//!
//! An ordered list of [`Contributor`]s owned by the validator for one run.
//! A successful match moves the contributor to the front: whoever signed one
//! commit of a range has usually signed more of them, so later lookups in the
//! same run stop early.

use tracing::trace;

use crate::domain::models::{Contributor, SignedCommit};

#[derive(Debug, Clone, Default)]
pub struct ContributorRegistry {
    contributors: Vec<Contributor>,
}

impl ContributorRegistry {
    pub fn new(contributors: Vec<Contributor>) -> Self {
        Self { contributors }
    }

    /// Find the contributor whose key id equals the signature's key id.
    ///
    /// Comparison is exact string equality. On a match the contributor is
    /// moved to the front, keeping the relative order of everyone else.
    pub fn match_signature(&mut self, signature: &SignedCommit) -> Option<&Contributor> {
        let position = self
            .contributors
            .iter()
            .position(|c| c.key_id == signature.key_id)?;

        if position > 0 {
            self.contributors[..=position].rotate_right(1);
            trace!(key_id = %signature.key_id, from = position, "promoted contributor");
        }

        self.contributors.first()
    }

    pub fn contributors(&self) -> &[Contributor] {
        &self.contributors
    }

    /// Key ids in current registry order.
    pub fn key_ids(&self) -> Vec<&str> {
        self.contributors.iter().map(|c| c.key_id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }

    pub fn into_inner(self) -> Vec<Contributor> {
        self.contributors
    }
}

impl From<Vec<Contributor>> for ContributorRegistry {
    fn from(contributors: Vec<Contributor>) -> Self {
        Self::new(contributors)
    }
}
