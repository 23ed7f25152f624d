//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::check::CheckArgs;
use crate::cli::commands::inspect::InspectArgs;

#[derive(Parser, Debug)]
#[command(name = "commit-warden")]
#[command(
    about = "Reject branches containing commits not signed by a trusted contributor",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (replaces .commit-warden/config.yaml and local.yaml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Repository working tree to inspect
    #[arg(long, global = true, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Directory of trusted contributor records
    #[arg(long, global = true, value_name = "DIR")]
    pub contributors: Option<PathBuf>,

    /// Upper bound in seconds for each git invocation
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate every commit the source branch adds over the destination
    Check(CheckArgs),

    /// Show the signature record extracted for a single commit
    Inspect(InspectArgs),

    /// List the trusted contributors that would be loaded
    Contributors,
}
