//! Atomic persistence of report artifacts.

use crate::engine::ResultSet;
use crate::report::{narrative, record, ReportMeta};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Errors writing report artifacts. All are fatal to a run.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The temporary file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Temporary path being written.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The temporary file could not be moved into place.
    #[error("Failed to move report into place at {path}: {source}")]
    Rename {
        /// Final destination.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The structured record could not be serialized.
    #[error("Failed to serialize QA results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File names of the two artifacts within the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    /// Structured record file name.
    pub results: String,
    /// Narrative report file name.
    pub report: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            results: "QA_RESULTS.json".to_string(),
            report: "QA_REPORT.md".to_string(),
        }
    }
}

/// Where the artifacts were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedReports {
    /// Path of the structured record.
    pub results: PathBuf,
    /// Path of the narrative report.
    pub report: PathBuf,
}

/// Renders both artifacts and writes them into `dir` as a pair.
///
/// Both files are staged first and only then moved into place. If the
/// second move fails, the first is rolled back, so a failed save never
/// leaves a new record next to a stale report.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or either file
/// cannot be written. A failed write leaves no partial file behind.
pub fn save_reports(
    result: &ResultSet,
    meta: &ReportMeta,
    dir: &Path,
    names: &ArtifactNames,
) -> Result<SavedReports, PersistError> {
    fs::create_dir_all(dir).map_err(|source| PersistError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let json = record::to_json(&record::render(result, meta))?;
    let markdown = narrative::render(result, meta);
    let results = dir.join(&names.results);
    let report = dir.join(&names.report);

    let staged_results = stage(&results, json.as_bytes())?;
    let staged_report = stage(&report, markdown.as_bytes()).map_err(|e| {
        discard(&staged_results);
        e
    })?;

    let previous = backup(&results).map_err(|e| {
        discard(&staged_results);
        discard(&staged_report);
        e
    })?;

    if let Err(e) = commit(&staged_results, &results) {
        discard(&staged_report);
        restore(previous.as_deref(), &results);
        return Err(e);
    }
    if let Err(e) = commit(&staged_report, &report) {
        warn!(
            "Rolling back {} after failing to save {}",
            results.display(),
            report.display()
        );
        restore(previous.as_deref(), &results);
        return Err(e);
    }
    if let Some(previous) = previous {
        discard(&previous);
    }

    info!("Saved JSON results to {}", results.display());
    info!("Saved Markdown report to {}", report.display());
    Ok(SavedReports { results, report })
}

/// Writes `contents` to a sibling temporary file, then renames it over `path`.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be written or renamed.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), PersistError> {
    let staged = stage(path, contents)?;
    commit(&staged, path)
}

/// Writes `contents` next to `path` and returns the staged file.
fn stage(path: &Path, contents: &[u8]) -> Result<PathBuf, PersistError> {
    let temp_path = sibling(path, "tmp");
    if let Err(source) = fs::write(&temp_path, contents) {
        discard(&temp_path);
        return Err(PersistError::Write {
            path: temp_path,
            source,
        });
    }
    Ok(temp_path)
}

/// Moves a staged file over `path`, removing it if the move fails.
fn commit(staged: &Path, path: &Path) -> Result<(), PersistError> {
    fs::rename(staged, path).map_err(|source| {
        discard(staged);
        PersistError::Rename {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Moves an existing file at `path` aside so it can be restored.
fn backup(path: &Path) -> Result<Option<PathBuf>, PersistError> {
    if !path.is_file() {
        return Ok(None);
    }
    let backup_path = sibling(path, "bak");
    fs::rename(path, &backup_path).map_err(|source| PersistError::Rename {
        path: backup_path.clone(),
        source,
    })?;
    Ok(Some(backup_path))
}

/// Puts the previous file back at `path`, or removes `path` if there was none.
fn restore(previous: Option<&Path>, path: &Path) {
    let outcome = match previous {
        Some(previous) => fs::rename(previous, path),
        None => fs::remove_file(path),
    };
    if let Err(e) = outcome {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to roll back {}: {e}", path.display());
        }
    }
}

fn discard(path: &Path) {
    let _ = fs::remove_file(path);
}

fn sibling(path: &Path, extension: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".");
    name.push(extension);
    path.with_file_name(name)
}
