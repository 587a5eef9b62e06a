//! Declarative requirement catalogs driven by TOML configuration.
//!
//! # Architecture
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! config_dto types
//!   ↓ validate + convert
//! Registry
//! ```

use miette::Diagnostic;
use std::path::{Path, PathBuf};

use crate::registry::Registry;

pub mod config_dto;
pub mod loader;

/// Errors from parsing TOML and loading a catalog.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum LoadCatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    #[diagnostic(code(arch_qa::catalog::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    #[diagnostic(code(arch_qa::catalog::toml))]
    Toml(#[from] toml::de::Error),

    /// Catalog validation failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] loader::LoadError),
}

/// Parses TOML content and registers every requirement it declares.
///
/// Returns an empty registry if no catalog sections are present.
///
/// # Errors
///
/// Returns an error if TOML parsing or validation fails.
pub fn load_catalog_from_toml(content: &str) -> Result<Registry, LoadCatalogError> {
    let dto: config_dto::CatalogDto = toml::from_str(content)?;
    let registry = loader::load(dto)?;
    tracing::debug!("Loaded {} requirement(s) from catalog", registry.len());
    Ok(registry)
}

/// Reads a catalog file and registers every requirement it declares.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load_catalog_file(path: &Path) -> Result<Registry, LoadCatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadCatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_catalog_from_toml(&content)
}
