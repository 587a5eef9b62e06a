//! Report rendering.
//!
//! Two independent, pure transforms of the same [`ResultSet`](crate::ResultSet):
//!
//! ```text
//! ResultSet + ReportMeta
//!   ├─ record::render()    → QaRecord (JSON artifact)
//!   └─ narrative::render() → markdown document
//! ```

use chrono::{DateTime, SecondsFormat, Utc};

pub mod narrative;
pub mod record;

/// Metadata stamped onto a rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMeta {
    /// Document title (e.g. "PartPulse QA Report").
    pub title: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
}

impl ReportMeta {
    /// Creates metadata for `project`, stamped with the current time.
    #[must_use]
    pub fn now(project: &str) -> Self {
        Self::at(project, Utc::now())
    }

    /// Creates metadata for `project` with an explicit timestamp.
    #[must_use]
    pub fn at(project: &str, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: format!("{project} QA Report"),
            generated_at,
        }
    }

    /// Returns the timestamp as an ISO-8601 string.
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}
