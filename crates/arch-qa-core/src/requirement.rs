//! Requirement model: what is checked and what a check concluded.

use crate::predicate::Predicate;
use serde::{Deserialize, Serialize};

/// Outcome of a single check: pass or fail, plus why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the check passed.
    pub passed: bool,
    /// Human-readable detail describing how the verdict was reached.
    pub explanation: String,
}

impl Verdict {
    /// Creates a passing verdict.
    #[must_use]
    pub fn pass(explanation: impl Into<String>) -> Self {
        Self {
            passed: true,
            explanation: explanation.into(),
        }
    }

    /// Creates a failing verdict.
    #[must_use]
    pub fn fail(explanation: impl Into<String>) -> Self {
        Self {
            passed: false,
            explanation: explanation.into(),
        }
    }

    /// Creates a verdict from a boolean.
    #[must_use]
    pub fn from_bool(passed: bool, explanation: impl Into<String>) -> Self {
        Self {
            passed,
            explanation: explanation.into(),
        }
    }

    /// Returns the status this verdict maps to.
    #[must_use]
    pub fn status(&self) -> Status {
        if self.passed {
            Status::Pass
        } else {
            Status::Fail
        }
    }
}

/// Final status of an evaluated requirement.
///
/// A registered [`Requirement`] has not been evaluated yet; only an
/// [`Outcome`] carries a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// The requirement is met.
    Pass,
    /// The requirement is not met.
    Fail,
}

impl Status {
    /// Returns the status icon used in the narrative report.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Pass => "✅",
            Self::Fail => "❌",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// How a requirement is checked.
///
/// Every variant carries a path, a predicate, or both, so a requirement
/// can never be registered with nothing to check.
#[derive(Debug, Clone)]
pub enum Check {
    /// The path must exist as a regular file under the project root.
    Existence {
        /// Path relative to the project root.
        path: String,
    },
    /// The predicate alone decides the verdict.
    Predicate(Predicate),
    /// Existence is checked first, then the predicate's verdict replaces it.
    Combined {
        /// Path relative to the project root.
        path: String,
        /// Authoritative predicate.
        predicate: Predicate,
    },
}

impl Check {
    /// Returns the existence-check path, if any.
    #[must_use]
    pub fn target_path(&self) -> Option<&str> {
        match self {
            Self::Existence { path } | Self::Combined { path, .. } => Some(path),
            Self::Predicate(_) => None,
        }
    }

    /// Returns the predicate, if any.
    #[must_use]
    pub fn predicate(&self) -> Option<&Predicate> {
        match self {
            Self::Predicate(predicate) | Self::Combined { predicate, .. } => Some(predicate),
            Self::Existence { .. } => None,
        }
    }

    /// Returns a short label for listings (e.g. `file`, `content-match`).
    #[must_use]
    pub fn kind(&self) -> String {
        match self {
            Self::Existence { .. } => "file".to_string(),
            Self::Predicate(predicate) => predicate.kind().to_string(),
            Self::Combined { predicate, .. } => format!("file+{}", predicate.kind()),
        }
    }
}

/// A single checkable architecture rule, as registered.
#[derive(Debug, Clone)]
pub struct Requirement {
    category: String,
    name: String,
    description: String,
    check: Check,
}

impl Requirement {
    /// Creates a new requirement.
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        check: Check,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            description: description.into(),
            check,
        }
    }

    /// Returns the grouping category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the short identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable intent.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns how this requirement is checked.
    #[must_use]
    pub fn check(&self) -> &Check {
        &self.check
    }

    /// Returns the existence-check path, if any.
    #[must_use]
    pub fn target_path(&self) -> Option<&str> {
        self.check.target_path()
    }

    /// Records `verdict` against this requirement.
    #[must_use]
    pub fn conclude(&self, verdict: Verdict) -> Outcome {
        Outcome {
            category: self.category.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            target_path: self.target_path().map(String::from),
            status: verdict.status(),
            explanation: verdict.explanation,
        }
    }
}

/// An evaluated requirement. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Grouping category.
    pub category: String,
    /// Short identifier.
    pub name: String,
    /// Human-readable intent.
    pub description: String,
    /// Existence-check path, if the requirement had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,
    /// PASS or FAIL.
    pub status: Status,
    /// Why the status was reached.
    pub explanation: String,
}

impl Outcome {
    /// Returns true if the requirement passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }
}
