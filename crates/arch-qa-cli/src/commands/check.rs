//! Check command implementation.

use anyhow::{Context, Result};
use arch_qa_core::{evaluate, save_reports, Config, Probe, ReportMeta};
use std::path::{Path, PathBuf};

use crate::config_resolver::Loaded;
use crate::OutputFormat;

/// Options for a check run.
pub struct CheckOptions {
    /// Console output format.
    pub format: OutputFormat,
    /// Overrides `qa.output_dir`.
    pub out_dir: Option<PathBuf>,
    /// Write the report artifacts.
    pub save: bool,
    /// Exit with status 1 when any requirement fails.
    pub fail_on_red: bool,
}

/// Runs the check command.
pub fn run(path: &Path, options: &CheckOptions, loaded: &Loaded) -> Result<()> {
    let Loaded { config, registry } = loaded;
    let root = path.join(&config.qa.root);

    tracing::info!(
        "Checking {} against {} requirement(s)",
        root.display(),
        registry.len()
    );

    let result = evaluate(registry, &Probe::new(&root));
    let meta = ReportMeta::now(&config.qa.project);

    let saved = if options.save {
        let dir = output_dir(&root, config, options.out_dir.as_deref());
        let saved = save_reports(&result, &meta, &dir, &config.artifact_names())
            .with_context(|| format!("Failed to save reports to {}", dir.display()))?;
        Some(saved)
    } else {
        None
    };

    super::output::print(&result, &meta, saved.as_ref(), options.format)?;

    if should_fail(options.fail_on_red || config.qa.fail_on_red, result.has_failures()) {
        std::process::exit(1);
    }

    Ok(())
}

fn output_dir(root: &Path, config: &Config, flag: Option<&Path>) -> PathBuf {
    flag.map_or_else(|| root.join(&config.qa.output_dir), Path::to_path_buf)
}

/// Exit-code policy: failing requirements only fail the process when asked to.
fn should_fail(fail_on_red: bool, has_failures: bool) -> bool {
    fail_on_red && has_failures
}
