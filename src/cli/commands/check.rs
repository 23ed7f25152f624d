//! `check`: the signature gate for a proposed branch.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use serde::Serialize;
use std::sync::Arc;

use crate::adapters::contributors::DirectoryContributorSource;
use crate::adapters::git::{GitCli, GitCliConfig};
use crate::cli::output::{CommandOutput, TableFormatter, output};
use crate::domain::models::{Config, Contributor, ValidationMode, ValidationReport, Verdict};
use crate::domain::ports::{ContributorSource, VersionControl};
use crate::services::SignatureGate;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Branch proposing the change
    #[arg(
        long,
        visible_alias = "source_branch",
        env = "source_branch",
        value_name = "REF"
    )]
    pub source_branch: String,

    /// Branch the change would be merged into
    #[arg(
        long,
        visible_alias = "destination_branch",
        env = "destination_branch",
        value_name = "REF"
    )]
    pub destination_branch: String,

    /// Keep evaluating after the first rejected commit and report all of them
    #[arg(long)]
    pub report_all: bool,
}

impl CheckArgs {
    pub const fn mode(&self, configured: ValidationMode) -> ValidationMode {
        if self.report_all {
            ValidationMode::Exhaustive
        } else {
            configured
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub source_branch: String,
    pub destination_branch: String,
    pub mode: ValidationMode,
    #[serde(flatten)]
    pub report: ValidationReport,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let report = &self.report;
        let mut lines = vec![format!(
            "{} commit(s) on '{}' not in '{}'",
            report.commits_in_range, self.source_branch, self.destination_branch
        )];

        if !report.trusted.is_empty() || !report.rejections.is_empty() {
            lines.push(TableFormatter::new().format_report(report));
        }

        if report.skipped > 0 {
            lines.push(format!(
                "{} commit(s) not evaluated after the first rejection (use --report-all to see them)",
                report.skipped
            ));
        }

        let verdict = match report.verdict {
            Verdict::Accepted => style("ACCEPTED").green().bold(),
            Verdict::Rejected => style("REJECTED").red().bold(),
        };
        match report.first_rejection() {
            Some(rejection) => lines.push(format!(
                "{verdict}: commit {} {}",
                rejection.commit, rejection.reason
            )),
            None => lines.push(format!("{verdict}: every commit is signed by a trusted contributor")),
        }

        lines.join("\n")
    }
}

/// Run the gate against the given version control backend.
pub async fn run(
    args: &CheckArgs,
    vcs: Arc<dyn VersionControl>,
    contributors: Vec<Contributor>,
    configured_mode: ValidationMode,
) -> Result<CheckOutput> {
    let mode = args.mode(configured_mode);
    let report = SignatureGate::new(vcs, mode)
        .check(&args.source_branch, &args.destination_branch, contributors)
        .await
        .context("Failed to resolve the commits under review")?;

    Ok(CheckOutput {
        source_branch: args.source_branch.clone(),
        destination_branch: args.destination_branch.clone(),
        mode,
        report,
    })
}

pub async fn execute(args: CheckArgs, config: &Config, json_mode: bool) -> Result<Verdict> {
    let contributors = DirectoryContributorSource::new(&config.contributors.directory)
        .load()
        .await
        .context("Failed to load trusted contributors")?;

    let vcs = Arc::new(GitCli::new(GitCliConfig::from_config(
        &config.repository,
        &config.verification,
    )));

    let result = run(&args, vcs, contributors, config.verification.mode).await?;
    output(&result, json_mode);

    Ok(result.report.verdict)
}
