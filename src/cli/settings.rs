//! Resolution of the effective configuration for one invocation.

use anyhow::{Context, Result};

use crate::cli::types::Cli;
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

/// Load layered configuration and apply the global command-line flags on top.
pub fn resolve(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    apply_overrides(cli, &mut config);
    ConfigLoader::validate(&config).context("Invalid command-line override")?;

    Ok(config)
}

/// Flags sit above every other configuration layer.
pub fn apply_overrides(cli: &Cli, config: &mut Config) {
    if let Some(repo) = &cli.repo {
        config.repository.path = repo.display().to_string();
    }
    if let Some(dir) = &cli.contributors {
        config.contributors.directory = dir.display().to_string();
    }
    if let Some(timeout) = cli.timeout_secs {
        config.verification.timeout_secs = timeout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn flags_override_loaded_values() {
        let cli = Cli::try_parse_from([
            "commit-warden",
            "--repo",
            "/srv/repo",
            "--contributors",
            "/etc/keys",
            "--timeout-secs",
            "5",
            "contributors",
        ])
        .unwrap();

        let mut config = Config::default();
        apply_overrides(&cli, &mut config);

        assert_eq!(config.repository.path, "/srv/repo");
        assert_eq!(config.contributors.directory, "/etc/keys");
        assert_eq!(config.verification.timeout_secs, 5);
    }

    #[test]
    fn absent_flags_leave_config_alone() {
        let cli = Cli::try_parse_from(["commit-warden", "contributors"]).unwrap();

        let mut config = Config::default();
        config.repository.path = "/from/file".to_string();
        apply_overrides(&cli, &mut config);

        assert_eq!(config.repository.path, "/from/file");
        assert_eq!(config.verification.timeout_secs, 30);
    }

    #[test]
    fn zero_timeout_flag_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.yaml");
        std::fs::write(&file, "repository:\n  path: .\n").unwrap();

        let cli = Cli::try_parse_from([
            "commit-warden",
            "--config",
            file.to_str().unwrap(),
            "--timeout-secs",
            "0",
            "contributors",
        ])
        .unwrap();

        let result = temp_env::with_vars_unset(
            ["COMMIT_WARDEN_VERIFICATION__TIMEOUT_SECS"],
            || resolve(&cli),
        );
        assert!(result.is_err());
    }
}
