//! # arch-qa
//!
//! Architecture compliance checking with requirement traceability.
//!
//! This is the facade crate that re-exports the core engine and the
//! `check!()` macro.
//!
//! ## Quick Start: `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! arch-qa = "0.1"
//! ```
//!
//! ```rust,ignore
//! // tests/architecture.rs
//! arch_qa::check!();
//! ```
//!
//! The generated test evaluates the catalog in `arch-qa.toml` and fails
//! with the outstanding-items list when any requirement is not met.
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use arch_qa::{evaluate, ContentPattern, Predicate, Probe, Registry, ReportMeta};
//!
//! let mut registry = Registry::new();
//! registry.register_files([
//!     ("Configuration", "package.json", "Package config", "package.json"),
//!     ("Database", "schema.prisma", "Prisma schema", "prisma/schema.prisma"),
//! ]);
//! registry.register_predicate(
//!     "Database Schema",
//!     "User Model",
//!     "User model exists in Prisma schema",
//!     Predicate::content_match("prisma/schema.prisma", ContentPattern::new(r"model\s+User\s*\{")?),
//! );
//!
//! let result = evaluate(&registry, &Probe::new("."));
//! println!("{}", arch_qa::report::narrative::render(&result, &ReportMeta::now("Demo")));
//! ```

#![forbid(unsafe_code)]

// Re-export core types
pub use arch_qa_core::*;

// Re-export the check macro for arch_qa::check!()
pub use arch_qa_macros::check;

mod runner;

#[doc(hidden)]
pub mod __internal {
    pub use crate::runner::run_check;
}
