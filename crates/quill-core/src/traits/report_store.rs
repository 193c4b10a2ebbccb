use crate::errors::QuillResult;
use crate::models::{NewReport, ReportRecord};

/// Append-only, versioned report log keyed by (subject, report type).
#[allow(async_fn_in_trait)]
pub trait IReportStore: Send + Sync {
    /// Persist a new record, assigning id, version and `created_at`.
    /// `created_at` strictly increases within a key.
    async fn append(&self, report: NewReport) -> QuillResult<ReportRecord>;

    /// Full history for a key, newest first.
    async fn list(&self, subject: &str, report_type: &str) -> QuillResult<Vec<ReportRecord>>;

    /// Newest record for a key, if any.
    async fn latest(&self, subject: &str, report_type: &str) -> QuillResult<Option<ReportRecord>>;

    /// Remove one record as an explicit user action. Returns whether it existed.
    async fn delete(&self, id: &str) -> QuillResult<bool>;
}
