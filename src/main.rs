//! Commit Warden CLI entry point.

use clap::Parser;
use std::process::ExitCode;

use commit_warden::cli::commands::{check, contributors, inspect};
use commit_warden::cli::{Cli, Commands, handle_error, settings};
use commit_warden::domain::models::Verdict;
use commit_warden::infrastructure::logging::{LogConfig, Logger};

const EXIT_REJECTED: u8 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match settings::resolve(&cli) {
        Ok(config) => config,
        Err(err) => return handle_error(err, cli.json),
    };

    let _logger = match Logger::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => return handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Check(args) => check::execute(args, &config, cli.json).await.map(|verdict| {
            match verdict {
                Verdict::Accepted => ExitCode::SUCCESS,
                Verdict::Rejected => ExitCode::from(EXIT_REJECTED),
            }
        }),
        Commands::Inspect(args) => inspect::execute(args, &config, cli.json)
            .await
            .map(|()| ExitCode::SUCCESS),
        Commands::Contributors => contributors::execute(&config, cli.json)
            .await
            .map(|()| ExitCode::SUCCESS),
    };

    result.unwrap_or_else(|err| handle_error(err, cli.json))
}
