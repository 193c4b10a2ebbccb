//! In-memory report store.

use dashmap::DashMap;
use quill_core::errors::QuillResult;
use quill_core::models::{NewReport, ReportKey, ReportRecord};
use quill_core::traits::IReportStore;

use crate::{build_record, next_created_at};

/// Report log held in memory. Appends to one key are serialized by the
/// key's map shard; different keys never contend on shared state beyond
/// the shard.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    /// Per-key history, oldest first.
    logs: DashMap<ReportKey, Vec<ReportRecord>>,
    /// Record id to its key, for deletes.
    index: DashMap<String, ReportKey>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total records across every key.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl IReportStore for InMemoryReportStore {
    async fn append(&self, report: NewReport) -> QuillResult<ReportRecord> {
        let key = report.key();
        let record = {
            let mut log = self.logs.entry(key.clone()).or_default();
            let previous = log.last();
            let version = previous.map_or(1, |r| r.version + 1);
            let created_at = next_created_at(previous.map(|r| r.created_at));
            let record = build_record(report, version, created_at);
            log.push(record.clone());
            record
        };
        self.index.insert(record.id.clone(), key);
        Ok(record)
    }

    async fn list(&self, subject: &str, report_type: &str) -> QuillResult<Vec<ReportRecord>> {
        let key = ReportKey::new(subject, report_type);
        Ok(self
            .logs
            .get(&key)
            .map(|log| log.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn latest(&self, subject: &str, report_type: &str) -> QuillResult<Option<ReportRecord>> {
        let key = ReportKey::new(subject, report_type);
        Ok(self.logs.get(&key).and_then(|log| log.last().cloned()))
    }

    async fn delete(&self, id: &str) -> QuillResult<bool> {
        let Some((_, key)) = self.index.remove(id) else {
            return Ok(false);
        };
        if let Some(mut log) = self.logs.get_mut(&key) {
            log.retain(|r| r.id != id);
        }
        Ok(true)
    }
}
