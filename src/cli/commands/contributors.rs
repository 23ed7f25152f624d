//! `contributors`: list the trusted contributor registry.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::adapters::contributors::DirectoryContributorSource;
use crate::cli::output::{CommandOutput, TableFormatter, output};
use crate::domain::models::{Config, Contributor};
use crate::domain::ports::ContributorSource;

#[derive(Debug, Serialize)]
pub struct ContributorListOutput {
    pub directory: String,
    pub contributors: Vec<Contributor>,
    pub total: usize,
}

impl CommandOutput for ContributorListOutput {
    fn to_human(&self) -> String {
        if self.contributors.is_empty() {
            return format!(
                "No trusted contributors in {}; every signed commit would be rejected.",
                self.directory
            );
        }

        format!(
            "{} trusted contributor(s) in {}:\n{}",
            self.total,
            self.directory,
            TableFormatter::new().format_contributors(&self.contributors)
        )
    }
}

pub async fn list(source: &DirectoryContributorSource) -> Result<ContributorListOutput> {
    let contributors = source
        .load()
        .await
        .context("Failed to load trusted contributors")?;

    Ok(ContributorListOutput {
        directory: source.directory().display().to_string(),
        total: contributors.len(),
        contributors,
    })
}

pub async fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let source = DirectoryContributorSource::new(&config.contributors.directory);
    let result = list(&source).await?;
    output(&result, json_mode);
    Ok(())
}
