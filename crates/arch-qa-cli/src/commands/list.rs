//! List command implementation.

use anyhow::Result;
use arch_qa_core::Registry;
use std::fmt::Write as _;

use crate::config_resolver::Loaded;

/// Runs the list command.
pub fn run(loaded: &Loaded) -> Result<()> {
    print!("{}", table(&loaded.registry));
    Ok(())
}

fn table(registry: &Registry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Registered requirements:\n");
    let _ = writeln!(out, "{:<22} {:<30} Check", "Category", "Name");
    let _ = writeln!(out, "{}", "-".repeat(80));

    for requirement in registry.iter() {
        let _ = writeln!(
            out,
            "{:<22} {:<30} {}",
            requirement.category(),
            requirement.name(),
            requirement.check().kind()
        );
    }

    let _ = writeln!(out, "\n{} requirement(s)", registry.len());
    out
}
