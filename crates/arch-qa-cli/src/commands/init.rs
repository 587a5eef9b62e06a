//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

const CONFIG_NAME: &str = "arch-qa.toml";

const DEFAULT_CONFIG: &str = r#"# arch-qa configuration
#
# Run settings live under [qa]; the requirement catalog is the list of
# [[files]] and [[checks]] entries below.

[qa]
project = "Project"
# root = "."
output_dir = "qa"
# results_file = "QA_RESULTS.json"
# report_file = "QA_REPORT.md"

# Exit with status 1 when any requirement fails
fail_on_red = false

# Existence checks
[[files]]
category = "Configuration"
name = "README.md"
description = "Project readme"
path = "README.md"

# Predicate checks. `kind` is one of:
#   content-match      path, pattern (regex, case-insensitive), found?, missing?
#   contains-all       path, terms
#   contains-any-file  paths, needle
#   directory-exists   path
# Set `target` to also require a file; the predicate verdict wins.
#
# Patterns use Rust `regex` syntax. A literal `{` or `}` must be escaped,
# so write 'model\s+User\s*\{' rather than 'model\s+User\s*{'.

# [[checks]]
# category = "Database Schema"
# name = "User Model"
# description = "User model exists in Prisma schema"
# kind = "content-match"
# path = "prisma/schema.prisma"
# pattern = 'model\s+User\s*\{'
# found = "User model found"
# missing = "User model not found"
"#;

/// Runs the init command, writing a starter config into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = write_config(dir, force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to describe your architecture requirements");
    println!("  2. Run: arch-qa check");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}
