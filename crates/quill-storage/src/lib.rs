//! # quill-storage
//!
//! Report version stores and the raw data cache.
//!
//! Both report stores are append-only logs keyed by (subject, report type).
//! Every append gets a fresh id, the next version number for its key, and a
//! `created_at` strictly later than the key's previous record, even when
//! two appends land in the same clock tick.

pub mod memory;
pub mod raw_cache;
pub mod sqlite;

pub use memory::InMemoryReportStore;
pub use raw_cache::InMemoryRawDataCache;
pub use sqlite::SqliteReportStore;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use quill_core::errors::{QuillError, StorageError};
use quill_core::models::{NewReport, ReportRecord};

/// Convert a storage failure into a `QuillError::Storage(Persistence)`.
pub(crate) fn to_storage_err(operation: &str, message: impl ToString) -> QuillError {
    StorageError::Persistence {
        operation: operation.to_string(),
        message: message.to_string(),
    }
    .into()
}

/// Timestamp for the next record of a key: now at microsecond precision,
/// bumped past the key's previous record when the clock has not advanced.
pub(crate) fn next_created_at(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now().trunc_subsecs(6);
    match previous {
        Some(prev) if now <= prev => prev + Duration::microseconds(1),
        _ => now,
    }
}

/// Materialize an appended record.
pub(crate) fn build_record(
    report: NewReport,
    version: u64,
    created_at: DateTime<Utc>,
) -> ReportRecord {
    let content_hash = ReportRecord::compute_content_hash(&report.content);
    ReportRecord {
        id: uuid::Uuid::new_v4().to_string(),
        subject: report.subject,
        report_type: report.report_type,
        version,
        content: report.content,
        prompt_used: report.prompt_used,
        content_hash,
        created_at,
    }
}
