//! Per-repository preferences stored in `.gitcli-config.json`.
//!
//! The file lives in the repository's working directory. Missing keys take
//! their defaults and an unreadable or corrupt file falls back to the
//! defaults entirely. The file is written only when the user changes a
//! setting.

use crate::core::error::{GitCliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".gitcli-config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationRules {
    pub enabled: bool,
    pub block_large_files: bool,
    pub max_file_size_mb: u64,
    /// Zero disables the check.
    pub min_message_length: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            enabled: true,
            block_large_files: true,
            max_file_size_mb: 50,
            min_message_length: 0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub auto_stage: bool,
    pub auto_push: bool,
    pub learn_from_history: bool,
    pub commit_message_template: Option<String>,
    pub validation_rules: ValidationRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_stage: true,
            auto_push: true,
            learn_from_history: true,
            commit_message_template: None,
            validation_rules: ValidationRules::default(),
        }
    }
}

impl Config {
    pub fn path_in(workdir: &Path) -> PathBuf {
        workdir.join(CONFIG_FILE_NAME)
    }

    /// Load the settings for `workdir`, falling back to defaults.
    pub fn load(workdir: &Path) -> Self {
        let path = Self::path_in(workdir);
        if !path.exists() {
            return Self::default();
        }

        match Self::read(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| GitCliError::read_failed(path, e))?;
        serde_json::from_str(&content).map_err(|e| GitCliError::parse_failed(path, e))
    }

    pub fn save(&self, workdir: &Path) -> Result<()> {
        let path = Self::path_in(workdir);
        let content =
            serde_json::to_string_pretty(self).map_err(GitCliError::serialization_failed)?;
        std::fs::write(&path, content).map_err(|e| GitCliError::write_failed(&path, e))?;
        log::debug!("saved settings to {}", path.display());
        Ok(())
    }

    /// Byte limit for a single staged file, when large files are blocked.
    pub fn max_file_bytes(&self) -> Option<u64> {
        let rules = &self.validation_rules;
        (rules.enabled && rules.block_large_files)
            .then(|| rules.max_file_size_mb.saturating_mul(1024 * 1024))
    }

    pub fn min_message_length(&self) -> Option<usize> {
        let rules = &self.validation_rules;
        (rules.enabled && rules.min_message_length > 0).then_some(rules.min_message_length)
    }
}
