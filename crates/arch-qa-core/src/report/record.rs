//! Machine-readable report record.

use crate::aggregate::Stats;
use crate::engine::ResultSet;
use crate::report::ReportMeta;
use crate::requirement::Status;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The structured QA artifact. Its JSON shape is a public contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaRecord {
    /// ISO-8601 generation time.
    pub timestamp: String,
    /// Number of requirements evaluated.
    pub total_requirements: usize,
    /// Number that passed.
    pub passed: usize,
    /// Number that failed.
    pub failed: usize,
    /// Global pass rate, one decimal.
    pub pass_rate: f64,
    /// Per-category statistics keyed by category name.
    pub categories: BTreeMap<String, Stats>,
    /// One entry per requirement, in registration order.
    pub details: Vec<DetailRecord>,
}

/// One requirement's line in [`QaRecord::details`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    /// Grouping category.
    pub category: String,
    /// Short identifier.
    pub name: String,
    /// Human-readable intent.
    pub description: String,
    /// PASS or FAIL.
    pub status: Status,
    /// Why the status was reached.
    pub details: String,
}

/// Renders the structured record.
#[must_use]
pub fn render(result: &ResultSet, meta: &ReportMeta) -> QaRecord {
    let global = &result.summary.global;

    let categories = result
        .summary
        .categories
        .iter()
        .map(|c| {
            let stats = Stats {
                pass_rate: round_one_decimal(c.stats.pass_rate),
                ..c.stats
            };
            (c.name.clone(), stats)
        })
        .collect();

    let details = result
        .outcomes
        .iter()
        .map(|o| DetailRecord {
            category: o.category.clone(),
            name: o.name.clone(),
            description: o.description.clone(),
            status: o.status,
            details: o.explanation.clone(),
        })
        .collect();

    QaRecord {
        timestamp: meta.timestamp(),
        total_requirements: global.total,
        passed: global.passed,
        failed: global.failed,
        pass_rate: round_one_decimal(global.pass_rate),
        categories,
        details,
    }
}

/// Renders the record as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(record: &QaRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
