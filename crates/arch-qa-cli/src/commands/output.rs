//! Console output formatting for QA results.

use anyhow::Result;
use arch_qa_core::report::record;
use arch_qa_core::{ReportMeta, ResultSet, SavedReports, Status};
use std::fmt::Write as _;

use crate::OutputFormat;

const RULE: &str = "======================================================================";

/// Print QA results in the specified format.
pub fn print(
    result: &ResultSet,
    meta: &ReportMeta,
    saved: Option<&SavedReports>,
    format: OutputFormat,
) -> Result<()> {
    let out = match format {
        OutputFormat::Text => text(result, meta, saved),
        OutputFormat::Json => record::to_json(&record::render(result, meta))?,
        OutputFormat::Compact => compact(result),
    };
    print!("{out}");
    if matches!(format, OutputFormat::Json) {
        println!();
    }
    Ok(())
}

fn text(result: &ResultSet, meta: &ReportMeta, saved: Option<&SavedReports>) -> String {
    let mut out = String::new();
    let global = &result.summary.global;

    for outcome in result.failures() {
        let _ = writeln!(
            out,
            "\x1b[31mFAIL\x1b[0m [{}] {}: {}",
            outcome.category, outcome.name, outcome.explanation
        );
    }
    if result.has_failures() {
        out.push('\n');
    }

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{} - Results Summary", meta.title);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Total Requirements: {}", global.total);
    let _ = writeln!(out, "Passed: {} {}", global.passed, Status::Pass.icon());
    let _ = writeln!(out, "Failed: {} {}", global.failed, Status::Fail.icon());
    let _ = writeln!(out, "Pass Rate: {:.1}%", global.pass_rate);
    let _ = writeln!(out, "{RULE}");

    if result.has_failures() {
        let _ = writeln!(
            out,
            "\n\x1b[31m⚠️  FAILED - Architecture requirements not met\x1b[0m"
        );
        let _ = writeln!(
            out,
            "\n{} requirement(s) need to be addressed.",
            global.failed
        );
    } else {
        let _ = writeln!(
            out,
            "\n\x1b[32m✅ PASSED - All architecture requirements met!\x1b[0m"
        );
    }

    if let Some(saved) = saved {
        let _ = writeln!(out, "\nReports saved:");
        let _ = writeln!(out, "  - {}", saved.results.display());
        let _ = writeln!(out, "  - {}", saved.report.display());
    }
    out
}

fn compact(result: &ResultSet) -> String {
    let mut out = String::new();
    for outcome in &result.outcomes {
        let _ = writeln!(
            out,
            "{} [{}] {}: {}",
            outcome.status, outcome.category, outcome.name, outcome.explanation
        );
    }
    out
}
