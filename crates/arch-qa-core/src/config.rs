//! Configuration types for arch-qa.

use crate::persist::ArtifactNames;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for arch-qa.
///
/// Lives in the same `arch-qa.toml` as the requirement catalog; catalog
/// sections are ignored here and read by [`crate::catalog`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Run settings.
    #[serde(default)]
    pub qa: QaConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Returns the artifact file names.
    #[must_use]
    pub fn artifact_names(&self) -> ArtifactNames {
        ArtifactNames {
            results: self.qa.results_file.clone(),
            report: self.qa.report_file.clone(),
        }
    }
}

/// Run-level configuration (`[qa]` table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaConfig {
    /// Project name used in the report title.
    #[serde(default = "default_project")]
    pub project: String,

    /// Project root, relative to the directory being checked.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Directory the artifacts are written to, relative to the root.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name of the structured record.
    #[serde(default = "default_results_file")]
    pub results_file: String,

    /// File name of the narrative report.
    #[serde(default = "default_report_file")]
    pub report_file: String,

    /// Exit non-zero when any requirement fails.
    #[serde(default)]
    pub fail_on_red: bool,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            project: default_project(),
            root: default_root(),
            output_dir: default_output_dir(),
            results_file: default_results_file(),
            report_file: default_report_file(),
            fail_on_red: false,
        }
    }
}

fn default_project() -> String {
    "Project".to_string()
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("qa")
}

fn default_results_file() -> String {
    ArtifactNames::default().results
}

fn default_report_file() -> String {
    ArtifactNames::default().report
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
