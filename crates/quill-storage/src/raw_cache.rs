//! In-memory raw data cache. The fetch side upserts; the pipeline only reads.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use quill_core::errors::QuillResult;
use quill_core::models::{RawDataBundle, RawDataRecord};
use quill_core::traits::IRawDataCache;

#[derive(Debug, Default)]
pub struct InMemoryRawDataCache {
    subjects: DashMap<String, RawDataBundle>,
}

impl InMemoryRawDataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the cache with whole bundles, replacing any existing subject.
    pub fn with_bundles(bundles: impl IntoIterator<Item = RawDataBundle>) -> Self {
        let cache = Self::new();
        for bundle in bundles {
            cache.subjects.insert(bundle.subject.clone(), bundle);
        }
        cache
    }

    /// Store one fetch result, replacing the endpoint's previous payload.
    pub fn upsert(&self, record: RawDataRecord) {
        self.upsert_payload(&record.subject, record.endpoint, record.payload, record.fetched_at);
    }

    pub fn upsert_payload(
        &self,
        subject: &str,
        endpoint: impl Into<String>,
        payload: serde_json::Value,
        fetched_at: DateTime<Utc>,
    ) {
        self.subjects
            .entry(subject.to_string())
            .or_insert_with(|| RawDataBundle::new(subject))
            .insert(endpoint, payload, fetched_at);
    }

    /// Drop every cached endpoint for `subject`.
    pub fn remove(&self, subject: &str) -> bool {
        self.subjects.remove(subject).is_some()
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }
}

impl IRawDataCache for InMemoryRawDataCache {
    async fn get(&self, subject: &str) -> QuillResult<RawDataBundle> {
        Ok(self
            .subjects
            .get(subject)
            .map(|bundle| bundle.clone())
            .unwrap_or_else(|| RawDataBundle::new(subject)))
    }
}
