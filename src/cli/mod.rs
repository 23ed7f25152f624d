//! Command-line interface.

pub mod commands;
pub mod output;
pub mod settings;
pub mod types;

use console::style;
use std::process::ExitCode;

pub use types::{Cli, Commands};

/// Exit status when the branch could not be evaluated at all.
pub const EXIT_UNEVALUATED: u8 = 2;

/// Report a fatal error and return the matching exit status.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ExitCode {
    tracing::error!(error = %format!("{err:#}"), "command failed");

    if json_mode {
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let body = serde_json::json!({
            "verdict": "error",
            "error": err.to_string(),
            "causes": causes,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );
    } else {
        eprintln!("{} {err:#}", style("error:").red().bold());
    }

    ExitCode::from(EXIT_UNEVALUATED)
}
