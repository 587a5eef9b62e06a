//! # arch-qa-core
//!
//! Core engine for checking a project tree against architecture requirements.
//!
//! This crate provides:
//!
//! - [`Requirement`] and [`Check`] for describing what must hold
//! - [`Probe`] for read-only filesystem queries under a project root
//! - [`Registry`] for ordered requirement registration
//! - [`evaluate`] for producing a [`ResultSet`]
//! - [`aggregate`] for per-category and global statistics
//! - [`report`] for the structured record and the narrative document
//!
//! ## Example
//!
//! ```ignore
//! use arch_qa_core::{evaluate, Predicate, Probe, Registry, ReportMeta};
//!
//! let mut registry = Registry::new();
//! registry
//!     .register_file("Configuration", "package.json", "Package config", "package.json")
//!     .register_predicate(
//!         "Layout",
//!         "app",
//!         "App router directory",
//!         Predicate::directory_exists("app"),
//!     );
//!
//! let result = evaluate(&registry, &Probe::new("."));
//! let markdown = arch_qa_core::report::narrative::render(&result, &ReportMeta::now("Demo"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregate;
mod config;
mod engine;
mod persist;
mod predicate;
mod probe;
mod registry;
mod requirement;

pub mod catalog;
pub mod report;

pub use aggregate::{aggregate, pass_rate, CategoryStats, Stats, Summary};
pub use catalog::{load_catalog_file, load_catalog_from_toml, LoadCatalogError};
pub use config::{Config, ConfigError, QaConfig};
pub use engine::{evaluate, evaluate_requirement, ResultSet};
pub use persist::{save_reports, write_atomic, ArtifactNames, PersistError, SavedReports};
pub use predicate::{ContentPattern, Predicate};
pub use probe::{compile_pattern, Probe};
pub use registry::Registry;
pub use report::record::{DetailRecord, QaRecord};
pub use report::ReportMeta;
pub use requirement::{Check, Outcome, Requirement, Status, Verdict};
