//! `inspect`: show what the gate reads from one commit's signature.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

use crate::adapters::contributors::DirectoryContributorSource;
use crate::adapters::git::{GitCli, GitCliConfig};
use crate::cli::output::{CommandOutput, TableFormatter, output};
use crate::domain::models::{CommitId, Config, Contributor, SignatureRecord};
use crate::domain::ports::{ContributorSource, VersionControl};
use crate::services::{ContributorRegistry, SignatureCollector};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Commit to verify (any revision git accepts)
    pub commit: String,
}

#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub commit: CommitId,
    pub record: SignatureRecord,
    /// Contributor owning the signing key, if any
    pub trusted_by: Option<String>,
}

impl CommandOutput for InspectOutput {
    fn to_human(&self) -> String {
        format!(
            "Commit {}\n{}",
            self.commit,
            TableFormatter::new().format_signature(&self.record, self.trusted_by.as_deref())
        )
    }
}

pub async fn run(
    commit: &str,
    vcs: Arc<dyn VersionControl>,
    contributors: Vec<Contributor>,
) -> Result<InspectOutput> {
    if commit.trim().is_empty() || commit.starts_with('-') {
        anyhow::bail!("'{commit}' is not a valid commit reference");
    }

    let commit = CommitId::new(commit);
    let record = SignatureCollector::new(vcs)
        .verify(&commit)
        .await
        .outcome
        .with_context(|| format!("Failed to read signature of {commit}"))?;

    let mut registry = ContributorRegistry::new(contributors);
    let trusted_by = record.as_signed().and_then(|signed| {
        registry
            .match_signature(signed)
            .map(|contributor| contributor.display_name().to_string())
    });

    Ok(InspectOutput {
        commit,
        record,
        trusted_by,
    })
}

pub async fn execute(args: InspectArgs, config: &Config, json_mode: bool) -> Result<()> {
    let contributors = DirectoryContributorSource::new(&config.contributors.directory)
        .load()
        .await
        .context("Failed to load trusted contributors")?;

    let vcs = Arc::new(GitCli::new(GitCliConfig::from_config(
        &config.repository,
        &config.verification,
    )));

    let result = run(&args.commit, vcs, contributors).await?;
    output(&result, json_mode);
    Ok(())
}
