use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Versioning key of the report log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportKey {
    pub subject: String,
    pub report_type: String,
}

impl ReportKey {
    pub fn new(subject: impl Into<String>, report_type: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            report_type: report_type.into(),
        }
    }
}

impl fmt::Display for ReportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.subject, self.report_type)
    }
}

/// Input to `IReportStore::append`. The store assigns id, version and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub subject: String,
    pub report_type: String,
    pub content: String,
    pub prompt_used: String,
}

impl NewReport {
    pub fn key(&self) -> ReportKey {
        ReportKey::new(&self.subject, &self.report_type)
    }
}

/// One immutable generated analysis. There is no update; newer records
/// supersede older ones for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub id: String,
    pub subject: String,
    pub report_type: String,
    /// 1-based position in the (subject, report type) history.
    pub version: u64,
    pub content: String,
    pub prompt_used: String,
    /// blake3 of `content`, for spotting identical regenerations.
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}

impl ReportRecord {
    pub fn key(&self) -> ReportKey {
        ReportKey::new(&self.subject, &self.report_type)
    }

    pub fn compute_content_hash(content: &str) -> String {
        blake3::hash(content.as_bytes()).to_hex().to_string()
    }
}
