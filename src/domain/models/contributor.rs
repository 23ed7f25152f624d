//! Trusted contributor domain model.

use serde::{Deserialize, Serialize};

/// A trusted identity allowed to sign commits.
///
/// Only `key_id` takes part in matching. Existing contributor files spell the
/// field `gpg_public_key`, which is accepted as an alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    #[serde(alias = "gpg_public_key")]
    pub key_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Contributor {
    pub fn new(key_id: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            name: None,
            email: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Name to show in reports, falling back to the key id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key_id)
    }
}
