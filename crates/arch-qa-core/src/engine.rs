//! Evaluation engine: turns a registry into a result set.

use crate::aggregate::{aggregate, Summary};
use crate::probe::Probe;
use crate::registry::Registry;
use crate::requirement::{Check, Outcome, Requirement, Verdict};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Evaluated requirements in registration order, with their statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// One outcome per registered requirement, in registration order.
    pub outcomes: Vec<Outcome>,
    /// Global and per-category statistics.
    pub summary: Summary,
}

impl ResultSet {
    /// Builds a result set from outcomes, computing the statistics.
    #[must_use]
    pub fn from_outcomes(outcomes: Vec<Outcome>) -> Self {
        let summary = aggregate(&outcomes);
        Self { outcomes, summary }
    }

    /// Returns true if any requirement failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.summary.global.failed > 0
    }

    /// Iterates over failed outcomes in registration order.
    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }
}

/// Evaluates every requirement once, in registration order.
///
/// Never fails: missing files and predicate faults are failing verdicts.
#[must_use]
pub fn evaluate(registry: &Registry, probe: &Probe) -> ResultSet {
    info!(
        "Evaluating {} requirement(s) against {}",
        registry.len(),
        probe.root().display()
    );

    let outcomes: Vec<Outcome> = registry
        .iter()
        .map(|requirement| evaluate_requirement(requirement, probe))
        .collect();
    let result = ResultSet::from_outcomes(outcomes);

    info!(
        "Evaluation complete: {} passed, {} failed",
        result.summary.global.passed, result.summary.global.failed
    );
    result
}

/// Evaluates a single requirement.
///
/// The existence check runs first when a path is set; a predicate, when
/// present, replaces its verdict.
#[must_use]
pub fn evaluate_requirement(requirement: &Requirement, probe: &Probe) -> Outcome {
    let verdict = match requirement.check() {
        Check::Existence { path } => existence(probe, path),
        Check::Predicate(predicate) => predicate.evaluate(probe),
        Check::Combined { path, predicate } => {
            let existence = existence(probe, path);
            let verdict = predicate.evaluate(probe);
            if existence.passed != verdict.passed {
                debug!(
                    "{}: predicate overrides existence verdict ({})",
                    requirement.name(),
                    existence.explanation
                );
            }
            verdict
        }
    };

    debug!(
        "[{}] {}: {} - {}",
        requirement.category(),
        requirement.name(),
        verdict.status(),
        verdict.explanation
    );
    requirement.conclude(verdict)
}

fn existence(probe: &Probe, path: &str) -> Verdict {
    if probe.file_exists(path) {
        Verdict::pass(format!("File exists: {path}"))
    } else {
        Verdict::fail(format!("File missing: {path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Predicate;
    use crate::requirement::Status;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> (TempDir, Probe) {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("present.json"), "{}").unwrap();
        let probe = Probe::new(tmp.path());
        (tmp, probe)
    }

    fn always(passed: bool) -> Predicate {
        Predicate::custom("fixed", move |_: &Probe| {
            Verdict::from_bool(passed, if passed { "predicate ok" } else { "pattern not found" })
        })
    }

    #[test]
    fn existence_only_follows_file_presence() {
        let (_tmp, probe) = project();
        let mut registry = Registry::new();
        registry
            .register_file("Config", "present", "", "present.json")
            .register_file("Config", "absent", "", "absent.json");

        let result = evaluate(&registry, &probe);
        assert_eq!(result.outcomes[0].status, Status::Pass);
        assert_eq!(result.outcomes[0].explanation, "File exists: present.json");
        assert_eq!(result.outcomes[1].status, Status::Fail);
        assert_eq!(result.outcomes[1].explanation, "File missing: absent.json");
    }

    /// Final status for every combination of path presence and predicate result.
    #[test]
    fn override_rule_table() {
        let (_tmp, probe) = project();
        // (path, predicate, expected status, expected explanation)
        let table: [(Option<&str>, Option<bool>, Status, &str); 6] = [
            (Some("present.json"), None, Status::Pass, "File exists: present.json"),
            (Some("absent.json"), None, Status::Fail, "File missing: absent.json"),
            (None, Some(true), Status::Pass, "predicate ok"),
            (None, Some(false), Status::Fail, "pattern not found"),
            (Some("present.json"), Some(false), Status::Fail, "pattern not found"),
            (Some("absent.json"), Some(true), Status::Pass, "predicate ok"),
        ];

        for (path, predicate, status, explanation) in table {
            let check = match (path, predicate) {
                (Some(p), None) => Check::Existence { path: p.to_string() },
                (None, Some(b)) => Check::Predicate(always(b)),
                (Some(p), Some(b)) => Check::Combined {
                    path: p.to_string(),
                    predicate: always(b),
                },
                (None, None) => unreachable!("every row has a path or a predicate"),
            };
            let outcome = evaluate_requirement(&Requirement::new("X", "row", "", check), &probe);
            assert_eq!(outcome.status, status, "row {path:?} / {predicate:?}");
            assert_eq!(outcome.explanation, explanation, "row {path:?} / {predicate:?}");
        }
    }

    #[test]
    fn missing_file_scenario() {
        let (_tmp, probe) = project();
        let mut registry = Registry::new();
        registry.register_file("Config", "pkg", "desc", "missing.json");

        let result = evaluate(&registry, &probe);
        assert_eq!(result.outcomes[0].status, Status::Fail);
        assert_eq!(result.summary.global.total, 1);
        assert_eq!(result.summary.global.passed, 0);
        assert_eq!(result.summary.global.failed, 1);
        assert!((result.summary.global.pass_rate - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn predicate_overrides_existing_file() {
        let (_tmp, probe) = project();
        let mut registry = Registry::new();
        registry.register_combined("Config", "pkg", "desc", "present.json", always(false));

        let result = evaluate(&registry, &probe);
        assert_eq!(result.outcomes[0].status, Status::Fail);
        assert_eq!(result.outcomes[0].explanation, "pattern not found");
        assert_eq!(result.outcomes[0].target_path.as_deref(), Some("present.json"));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let (_tmp, probe) = project();
        let mut registry = Registry::new();
        registry
            .register_file("Config", "present", "", "present.json")
            .register_predicate("Layout", "src", "", Predicate::directory_exists("src"));

        assert_eq!(evaluate(&registry, &probe), evaluate(&registry, &probe));
    }

    #[test]
    fn empty_registry_yields_zero_stats() {
        let (_tmp, probe) = project();
        let result = evaluate(&Registry::new(), &probe);
        assert!(result.outcomes.is_empty());
        assert_eq!(result.summary.global.total, 0);
        assert!((result.summary.global.pass_rate - 0.0).abs() < f64::EPSILON);
        assert!(!result.has_failures());
    }

    #[test]
    fn failures_iterate_in_registration_order() {
        let (_tmp, probe) = project();
        let mut registry = Registry::new();
        registry
            .register_file("A", "first-missing", "", "a.txt")
            .register_file("A", "present", "", "present.json")
            .register_file("B", "second-missing", "", "b.txt");

        let result = evaluate(&registry, &probe);
        let failed: Vec<&str> = result.failures().map(|o| o.name.as_str()).collect();
        assert_eq!(failed, ["first-missing", "second-missing"]);
        assert!(result.has_failures());
    }
}
