use serde::{Deserialize, Serialize};

/// Main configuration structure for the gate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Repository under review
    #[serde(default)]
    pub repository: RepositoryConfig,

    /// Trusted contributor records
    #[serde(default)]
    pub contributors: ContributorsConfig,

    /// Signature verification behaviour
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Repository configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RepositoryConfig {
    /// Path to the git working tree
    #[serde(default = "default_repository_path")]
    pub path: String,

    /// Executable used for `log` and `verify-commit`
    #[serde(default = "default_git_binary")]
    pub git_binary: String,
}

fn default_repository_path() -> String {
    ".".to_string()
}

fn default_git_binary() -> String {
    "git".to_string()
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            path: default_repository_path(),
            git_binary: default_git_binary(),
        }
    }
}

/// Contributor registry source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ContributorsConfig {
    /// Directory holding one JSON or YAML record per contributor
    #[serde(default = "default_contributors_directory")]
    pub directory: String,
}

fn default_contributors_directory() -> String {
    "contributors".to_string()
}

impl Default for ContributorsConfig {
    fn default() -> Self {
        Self {
            directory: default_contributors_directory(),
        }
    }
}

/// How the validator reacts to the first disqualified commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Stop at the first rejection; later commits are never verified
    #[default]
    FailFast,
    /// Verify every commit and report all rejections
    Exhaustive,
}

/// Verification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VerificationConfig {
    /// Upper bound for every external git invocation, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub mode: ValidationMode,
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            mode: ValidationMode::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Optional directory for rolling log files
    #[serde(default)]
    pub directory: Option<String>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            directory: None,
            rotation: default_rotation(),
        }
    }
}
