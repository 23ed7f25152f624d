//! Directory-backed contributor source.
//!
//! Reads one contributor record per file. JSON (`.json` or no extension) and
//! YAML (`.yaml`, `.yml`) files are accepted; hidden files are ignored and any
//! other file is skipped with a warning. Files are read in file-name order so
//! the initial registry order is reproducible.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::domain::errors::{GateError, GateResult};
use crate::domain::models::Contributor;
use crate::domain::ports::ContributorSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordFormat {
    Json,
    Yaml,
}

impl RecordFormat {
    /// Files without an extension are read as JSON.
    fn from_path(path: &Path) -> Option<Self> {
        let Some(extension) = path.extension() else {
            return Some(Self::Json);
        };
        match extension.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

pub struct DirectoryContributorSource {
    directory: PathBuf,
}

impl DirectoryContributorSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    async fn record_paths(&self) -> GateResult<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(&self.directory)
            .await
            .map_err(|e| GateError::contributor_load(&self.directory, e))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| GateError::contributor_load(&self.directory, e))?
        {
            let path = entry.path();
            let hidden = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with('.'));
            if hidden || !path.is_file() {
                continue;
            }
            if RecordFormat::from_path(&path).is_none() {
                warn!(path = %path.display(), "skipping file that is not a contributor record");
                continue;
            }
            paths.push(path);
        }

        paths.sort();
        Ok(paths)
    }

    async fn read_record(path: &Path) -> GateResult<Contributor> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GateError::contributor_load(path, e))?;

        let contributor: Contributor = match RecordFormat::from_path(path) {
            Some(RecordFormat::Yaml) => serde_yaml::from_str(&content)
                .map_err(|e| GateError::contributor_load(path, e))?,
            _ => serde_json::from_str(&content)
                .map_err(|e| GateError::contributor_load(path, e))?,
        };

        if contributor.key_id.trim().is_empty() {
            return Err(GateError::contributor_load(path, "key_id is empty"));
        }

        Ok(contributor)
    }
}

#[async_trait]
impl ContributorSource for DirectoryContributorSource {
    #[instrument(skip(self), fields(directory = %self.directory.display()))]
    async fn load(&self) -> GateResult<Vec<Contributor>> {
        let mut contributors = Vec::new();
        let mut seen = HashSet::new();

        for path in self.record_paths().await? {
            let contributor = Self::read_record(&path).await?;
            if !seen.insert(contributor.key_id.clone()) {
                warn!(
                    path = %path.display(),
                    key_id = %contributor.key_id,
                    "key id listed by more than one contributor record"
                );
            }
            contributors.push(contributor);
        }

        if contributors.is_empty() {
            warn!("no trusted contributors configured; every signed commit will be rejected");
        }

        info!(count = contributors.len(), "contributors loaded");
        Ok(contributors)
    }
}
