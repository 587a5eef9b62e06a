//! Human-readable markdown report.
//!
//! Section order is fixed: Summary, Results by Category, Detailed Results,
//! Traceability Matrix, then either Next Steps or the all-met statement.

use crate::engine::ResultSet;
use crate::report::ReportMeta;
use crate::requirement::Outcome;
use std::fmt::Write;

/// Renders the markdown report.
#[must_use]
pub fn render(result: &ResultSet, meta: &ReportMeta) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {}", meta.title);
    let _ = writeln!(out);
    let _ = writeln!(out, "**Generated**: {}", meta.timestamp());
    let _ = writeln!(out);

    write_summary(&mut out, result);
    write_categories(&mut out, result);
    write_details(&mut out, result);
    write_matrix(&mut out, result);
    write_closing(&mut out, result);

    out
}

fn write_summary(out: &mut String, result: &ResultSet) {
    let global = &result.summary.global;
    let _ = writeln!(out, "## Summary");
    let _ = writeln!(out);
    let _ = writeln!(out, "- **Total Requirements**: {}", global.total);
    let _ = writeln!(out, "- **Passed**: {} ✅", global.passed);
    let _ = writeln!(out, "- **Failed**: {} ❌", global.failed);
    let _ = writeln!(out, "- **Pass Rate**: {:.1}%", global.pass_rate);
    let _ = writeln!(out);
}

fn write_categories(out: &mut String, result: &ResultSet) {
    let _ = writeln!(out, "## Results by Category");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Category | Total | Passed | Failed | Pass Rate |");
    let _ = writeln!(out, "|----------|-------|--------|--------|-----------|");

    for category in result.summary.categories_sorted() {
        let stats = &category.stats;
        let _ = writeln!(
            out,
            "| {} | {} | {} ✅ | {} ❌ | {:.1}% |",
            cell(&category.name),
            stats.total,
            stats.passed,
            stats.failed,
            stats.pass_rate
        );
    }
    let _ = writeln!(out);
}

fn write_details(out: &mut String, result: &ResultSet) {
    let _ = writeln!(out, "## Detailed Results");
    let _ = writeln!(out);

    for category in &result.summary.categories {
        let _ = writeln!(out, "### {}", category.name);
        let _ = writeln!(out);

        for outcome in result
            .outcomes
            .iter()
            .filter(|o| o.category == category.name)
        {
            write_detail(out, outcome);
        }
    }
}

fn write_detail(out: &mut String, outcome: &Outcome) {
    let _ = writeln!(out, "**{} {}**", outcome.status.icon(), outcome.name);
    let _ = writeln!(out, "- Description: {}", outcome.description);
    let _ = writeln!(out, "- Status: {}", outcome.status);
    let _ = writeln!(out, "- Details: {}", outcome.explanation);
    let _ = writeln!(out);
}

fn write_matrix(out: &mut String, result: &ResultSet) {
    let _ = writeln!(out, "## Traceability Matrix");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Requirement | Category | Status | Details |");
    let _ = writeln!(out, "|-------------|----------|--------|---------|");

    for outcome in &result.outcomes {
        let _ = writeln!(
            out,
            "| {} | {} | {} {} | {} |",
            cell(&outcome.name),
            cell(&outcome.category),
            outcome.status.icon(),
            outcome.status,
            cell(&outcome.explanation)
        );
    }
    let _ = writeln!(out);
}

fn write_closing(out: &mut String, result: &ResultSet) {
    if result.has_failures() {
        let _ = writeln!(out, "## Next Steps");
        let _ = writeln!(out);
        let _ = writeln!(out, "The following items need to be addressed:");
        let _ = writeln!(out);
        for outcome in result.failures() {
            let _ = writeln!(out, "- [ ] {}: {}", outcome.name, outcome.explanation);
        }
    } else {
        let _ = writeln!(out, "## ✅ All Requirements Met!");
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "The codebase is fully compliant with the architecture specification."
        );
    }
}

/// Escapes text for a markdown table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirement::Status;
    use chrono::{TimeZone, Utc};

    fn outcome(category: &str, name: &str, status: Status, explanation: &str) -> Outcome {
        Outcome {
            category: category.to_string(),
            name: name.to_string(),
            description: format!("{name} description"),
            target_path: None,
            status,
            explanation: explanation.to_string(),
        }
    }

    fn meta() -> ReportMeta {
        ReportMeta::at("Demo", Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap())
    }

    #[test]
    fn full_report_with_failures() {
        let result = ResultSet::from_outcomes(vec![
            outcome("Y", "c", Status::Pass, "File exists: c.txt"),
            outcome("X", "a", Status::Pass, "File exists: a.txt"),
            outcome("X", "b", Status::Fail, "Missing items: Invite"),
        ]);

        insta::assert_snapshot!(render(&result, &meta()), @r"
        # Demo QA Report

        **Generated**: 2026-01-02T03:04:05Z

        ## Summary

        - **Total Requirements**: 3
        - **Passed**: 2 ✅
        - **Failed**: 1 ❌
        - **Pass Rate**: 66.7%

        ## Results by Category

        | Category | Total | Passed | Failed | Pass Rate |
        |----------|-------|--------|--------|-----------|
        | X | 2 | 1 ✅ | 1 ❌ | 50.0% |
        | Y | 1 | 1 ✅ | 0 ❌ | 100.0% |

        ## Detailed Results

        ### Y

        **✅ c**
        - Description: c description
        - Status: PASS
        - Details: File exists: c.txt

        ### X

        **✅ a**
        - Description: a description
        - Status: PASS
        - Details: File exists: a.txt

        **❌ b**
        - Description: b description
        - Status: FAIL
        - Details: Missing items: Invite

        ## Traceability Matrix

        | Requirement | Category | Status | Details |
        |-------------|----------|--------|---------|
        | c | Y | ✅ PASS | File exists: c.txt |
        | a | X | ✅ PASS | File exists: a.txt |
        | b | X | ❌ FAIL | Missing items: Invite |

        ## Next Steps

        The following items need to be addressed:

        - [ ] b: Missing items: Invite
        ");
    }

    #[test]
    fn empty_result_takes_affirmative_path() {
        let doc = render(&ResultSet::from_outcomes(Vec::new()), &meta());
        assert!(doc.contains("- **Total Requirements**: 0"));
        assert!(doc.contains("- **Pass Rate**: 0.0%"));
        assert!(doc.contains("## ✅ All Requirements Met!"));
        assert!(!doc.contains("## Next Steps"));
    }

    #[test]
    fn sections_appear_in_contract_order() {
        let result = ResultSet::from_outcomes(vec![outcome("X", "a", Status::Pass, "ok")]);
        let doc = render(&result, &meta());

        let positions: Vec<usize> = [
            "## Summary",
            "## Results by Category",
            "## Detailed Results",
            "## Traceability Matrix",
            "## ✅ All Requirements Met!",
        ]
        .iter()
        .map(|heading| doc.find(heading).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn interleaved_categories_group_once_in_registration_order() {
        let result = ResultSet::from_outcomes(vec![
            outcome("A", "a1", Status::Pass, "ok"),
            outcome("B", "b1", Status::Pass, "ok"),
            outcome("A", "a2", Status::Fail, "no"),
        ]);
        let doc = render(&result, &meta());

        assert_eq!(doc.matches("### A").count(), 1);
        let a1 = doc.find("**✅ a1**").unwrap();
        let a2 = doc.find("**❌ a2**").unwrap();
        let b = doc.find("### B").unwrap();
        assert!(a1 < a2 && a2 < b);
    }

    #[test]
    fn table_cells_escape_pipes() {
        let result = ResultSet::from_outcomes(vec![outcome(
            "X",
            "a",
            Status::Fail,
            "expected a|b",
        )]);
        let doc = render(&result, &meta());
        assert!(doc.contains("| a | X | ❌ FAIL | expected a\\|b |"));
    }
}
