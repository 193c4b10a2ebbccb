use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DataError;

/// One cached fetch result for a (subject, endpoint) pair.
/// Owned by the fetch collaborator; read-only to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDataRecord {
    pub subject: String,
    pub endpoint: String,
    pub payload: serde_json::Value,
    pub fetched_at: DateTime<Utc>,
}

/// Payload plus fetch time, as the cache hands it out per endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedPayload {
    pub payload: serde_json::Value,
    pub fetched_at: DateTime<Utc>,
}

/// Every cached record for one subject, indexed by endpoint name.
/// Assembled on demand and never persisted by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDataBundle {
    pub subject: String,
    pub endpoints: BTreeMap<String, CachedPayload>,
}

impl RawDataBundle {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            endpoints: BTreeMap::new(),
        }
    }

    /// Insert or overwrite an endpoint. At most one live payload per endpoint.
    pub fn insert(
        &mut self,
        endpoint: impl Into<String>,
        payload: serde_json::Value,
        fetched_at: DateTime<Utc>,
    ) {
        self.endpoints.insert(
            endpoint.into(),
            CachedPayload {
                payload,
                fetched_at,
            },
        );
    }

    /// Builder-style insert stamped with the current time.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>, payload: serde_json::Value) -> Self {
        self.insert(endpoint, payload, Utc::now());
        self
    }

    /// Build a bundle from individual records. Later records for the same
    /// endpoint replace earlier ones. Records for other subjects are ignored.
    pub fn from_records(subject: &str, records: impl IntoIterator<Item = RawDataRecord>) -> Self {
        let mut bundle = Self::new(subject);
        for record in records {
            if record.subject == subject {
                bundle.insert(record.endpoint, record.payload, record.fetched_at);
            }
        }
        bundle
    }

    pub fn get(&self, endpoint: &str) -> Option<&serde_json::Value> {
        self.endpoints.get(endpoint).map(|c| &c.payload)
    }

    /// Payload of an endpoint the resolver guaranteed. Absence here means the
    /// calculator was invoked without the dependency gate.
    pub fn require(&self, endpoint: &str, report_type: &str) -> Result<&serde_json::Value, DataError> {
        self.get(endpoint).ok_or_else(|| DataError::DataUnavailable {
            subject: self.subject.clone(),
            report_type: report_type.to_string(),
            missing: vec![endpoint.to_string()],
        })
    }

    pub fn available_endpoints(&self) -> HashSet<String> {
        self.endpoints.keys().cloned().collect()
    }

    /// Endpoints whose payload was fetched before `cutoff`.
    pub fn stale_endpoints(&self, cutoff: DateTime<Utc>) -> Vec<String> {
        self.endpoints
            .iter()
            .filter(|(_, cached)| cached.fetched_at < cutoff)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn later_record_overwrites_earlier_for_same_endpoint() {
        let now = Utc::now();
        let records = vec![
            RawDataRecord {
                subject: "ACME".into(),
                endpoint: "profile".into(),
                payload: json!({"v": 1}),
                fetched_at: now - Duration::hours(2),
            },
            RawDataRecord {
                subject: "ACME".into(),
                endpoint: "profile".into(),
                payload: json!({"v": 2}),
                fetched_at: now,
            },
            RawDataRecord {
                subject: "OTHER".into(),
                endpoint: "ratios".into(),
                payload: json!({}),
                fetched_at: now,
            },
        ];
        let bundle = RawDataBundle::from_records("ACME", records);
        assert_eq!(bundle.len(), 1);
        assert_eq!(bundle.get("profile"), Some(&json!({"v": 2})));
    }

    #[test]
    fn require_reports_missing_endpoint() {
        let bundle = RawDataBundle::new("ACME");
        let err = bundle.require("ratiosTtm", "Scorecard").unwrap_err();
        assert!(matches!(err, DataError::DataUnavailable { ref missing, .. } if missing == &["ratiosTtm"]));
    }

    #[test]
    fn stale_endpoints_uses_fetch_time() {
        let now = Utc::now();
        let mut bundle = RawDataBundle::new("ACME");
        bundle.insert("profile", json!({}), now - Duration::days(30));
        bundle.insert("incomeAnnual", json!([]), now);
        assert_eq!(bundle.stale_endpoints(now - Duration::days(7)), vec!["profile"]);
    }
}
