use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Longest bound accepted for a single git invocation.
const MAX_TIMEOUT_SECS: u64 = 3600;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Repository path cannot be empty")]
    EmptyRepositoryPath,

    #[error("Git binary cannot be empty")]
    EmptyGitBinary,

    #[error("Contributors directory cannot be empty")]
    EmptyContributorsDirectory,

    #[error("Invalid timeout_secs: {0}. Must be between 1 and 3600")]
    InvalidTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .commit-warden/config.yaml (project config)
    /// 3. .commit-warden/local.yaml (local overrides, optional)
    /// 4. Environment variables (COMMIT_WARDEN_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".commit-warden/config.yaml"))
            .merge(Yaml::file(".commit-warden/local.yaml"))
            .merge(Env::prefixed("COMMIT_WARDEN_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring environment
    /// overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.is_file() {
            anyhow::bail!("Config file {} does not exist", path.display());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("COMMIT_WARDEN_").split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.repository.path.trim().is_empty() {
            return Err(ConfigError::EmptyRepositoryPath);
        }

        if config.repository.git_binary.trim().is_empty() {
            return Err(ConfigError::EmptyGitBinary);
        }

        if config.contributors.directory.trim().is_empty() {
            return Err(ConfigError::EmptyContributorsDirectory);
        }

        let timeout = config.verification.timeout_secs;
        if timeout == 0 || timeout > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout(timeout));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        Ok(())
    }
}
