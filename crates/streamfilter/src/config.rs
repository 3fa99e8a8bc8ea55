//! Project configuration file support for streamfilter.
//!
//! Loads optional defaults from `streamfilter.toml` in the working directory.
//! Flags and environment variables take priority over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use streamfilter_logging::{DEFAULT_ERROR_LOG, DEFAULT_ITERATION};

/// Project-level configuration loaded from `streamfilter.toml`
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Where error entries are appended
    pub error_log: Option<PathBuf>,
    /// Iteration tag stamped on every error entry
    pub iteration: Option<String>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "streamfilter.toml";

impl ProjectConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        Self::load_file(&working_dir.join(CONFIG_FILE_NAME))
    }

    pub fn load_file(config_path: &Path) -> Result<Option<Self>> {
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub error_log: PathBuf,
    pub iteration: String,
}

impl Settings {
    /// Priority: flag or environment > project file > built-in default
    pub fn resolve(
        error_log: Option<PathBuf>,
        iteration: Option<String>,
        project: Option<ProjectConfig>,
    ) -> Self {
        let project = project.unwrap_or_default();
        Self {
            error_log: error_log
                .or(project.error_log)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ERROR_LOG)),
            iteration: iteration
                .or(project.iteration)
                .unwrap_or_else(|| DEFAULT_ITERATION.to_string()),
        }
    }
}
