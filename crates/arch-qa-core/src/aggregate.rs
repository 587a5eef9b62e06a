//! Pass/fail rollup by category and globally.

use crate::requirement::Outcome;
use serde::{Deserialize, Serialize};

/// Pass/fail counts for one scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of requirements in scope.
    pub total: usize,
    /// Number that passed.
    pub passed: usize,
    /// Number that failed.
    pub failed: usize,
    /// `passed / total * 100`, or `0.0` when `total` is zero.
    pub pass_rate: f64,
}

impl Stats {
    /// Builds stats from counts, deriving `failed` and `pass_rate`.
    ///
    /// `passed` is capped at `total`.
    #[must_use]
    pub fn from_counts(total: usize, passed: usize) -> Self {
        let passed = passed.min(total);
        Self {
            total,
            passed,
            failed: total - passed,
            pass_rate: pass_rate(passed, total),
        }
    }

    fn record(&mut self, passed: bool) {
        *self = Self::from_counts(self.total + 1, self.passed + usize::from(passed));
    }
}

/// Statistics for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Category label.
    pub name: String,
    /// Counts within the category.
    pub stats: Stats,
}

/// Global statistics plus per-category statistics in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Counts across every requirement.
    pub global: Stats,
    /// Counts per category, ordered by first appearance.
    pub categories: Vec<CategoryStats>,
}

impl Summary {
    /// Looks up a category's statistics by name.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Stats> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.stats)
    }

    /// Returns categories sorted alphabetically by name.
    #[must_use]
    pub fn categories_sorted(&self) -> Vec<&CategoryStats> {
        let mut sorted: Vec<&CategoryStats> = self.categories.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }
}

/// Rolls outcomes up into global and per-category statistics.
#[must_use]
pub fn aggregate(outcomes: &[Outcome]) -> Summary {
    let mut categories: Vec<CategoryStats> = Vec::new();

    for outcome in outcomes {
        let index = match categories.iter().position(|c| c.name == outcome.category) {
            Some(index) => index,
            None => {
                categories.push(CategoryStats {
                    name: outcome.category.clone(),
                    stats: Stats::default(),
                });
                categories.len() - 1
            }
        };
        categories[index].stats.record(outcome.passed());
    }

    let passed = outcomes.iter().filter(|o| o.passed()).count();
    Summary {
        global: Stats::from_counts(outcomes.len(), passed),
        categories,
    }
}

/// Percentage of `passed` in `total`, `0.0` for an empty scope.
#[must_use]
#[allow(clippy::cast_precision_loss)] // requirement counts are far below 2^52
pub fn pass_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        passed as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirement::Status;

    fn outcome(category: &str, name: &str, status: Status) -> Outcome {
        Outcome {
            category: category.to_string(),
            name: name.to_string(),
            description: String::new(),
            target_path: None,
            status,
            explanation: String::new(),
        }
    }

    #[test]
    fn one_pass_one_fail_in_category() {
        let summary = aggregate(&[
            outcome("X", "a", Status::Pass),
            outcome("X", "b", Status::Fail),
        ]);
        let x = summary.category("X").unwrap();
        assert_eq!(x.total, 2);
        assert_eq!(x.passed, 1);
        assert_eq!(x.failed, 1);
        assert!((x.pass_rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn from_counts_caps_passed_at_total() {
        let stats = Stats::from_counts(1, 2);
        assert_eq!(stats.passed, 1);
        assert_eq!(stats.failed, 0);
        assert!((stats.pass_rate - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let summary = aggregate(&[
            outcome("Utilities", "a", Status::Pass),
            outcome("API Routes", "b", Status::Fail),
            outcome("Utilities", "c", Status::Pass),
        ]);
        let names: Vec<&str> = summary.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Utilities", "API Routes"]);

        let sorted: Vec<&str> = summary
            .categories_sorted()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(sorted, ["API Routes", "Utilities"]);
    }

    #[test]
    fn global_equals_sum_of_categories() {
        let summary = aggregate(&[
            outcome("A", "1", Status::Pass),
            outcome("B", "2", Status::Fail),
            outcome("B", "3", Status::Pass),
            outcome("C", "4", Status::Fail),
            outcome("A", "5", Status::Pass),
        ]);

        let total: usize = summary.categories.iter().map(|c| c.stats.total).sum();
        let passed: usize = summary.categories.iter().map(|c| c.stats.passed).sum();
        let failed: usize = summary.categories.iter().map(|c| c.stats.failed).sum();
        assert_eq!(summary.global.total, total);
        assert_eq!(summary.global.passed, passed);
        assert_eq!(summary.global.failed, failed);
        assert!((summary.global.pass_rate - 60.0).abs() < f64::EPSILON);

        for c in &summary.categories {
            assert_eq!(c.stats.passed + c.stats.failed, c.stats.total);
        }
    }

    #[test]
    fn empty_input_has_zero_rate() {
        let summary = aggregate(&[]);
        assert_eq!(summary.global, Stats::from_counts(0, 0));
        assert!(summary.categories.is_empty());
    }

    #[test]
    fn pass_rate_thirds() {
        assert!((pass_rate(1, 3) - 33.333_333_333_333_336).abs() < 1e-9);
        assert!((pass_rate(0, 0) - 0.0).abs() < f64::EPSILON);
    }
}
