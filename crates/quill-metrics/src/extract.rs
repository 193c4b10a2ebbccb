//! Field extraction from raw JSON payloads.
//!
//! Endpoint payloads are either a single object or an array of period
//! objects. Period arrays are ordered chronologically by their `date` field
//! when every record carries one; otherwise payload order is taken as
//! oldest-first. Numeric fields may arrive as JSON numbers or numeric
//! strings; anything else reads as "not available".

use std::collections::HashMap;

use quill_core::errors::DataError;
use quill_core::models::RawDataBundle;
use serde_json::{Map, Value};

pub type Record = Map<String, Value>;

/// Split a payload into records. Fails on shapes no calculator can read.
pub fn records<'a>(payload: &'a Value, endpoint: &str) -> Result<Vec<&'a Record>, DataError> {
    match payload {
        Value::Object(map) => Ok(vec![map]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_object().ok_or_else(|| DataError::MalformedField {
                    endpoint: endpoint.to_string(),
                    field: format!("[{i}]"),
                    reason: format!("expected object, found {}", kind_of(item)),
                })
            })
            .collect(),
        other => Err(DataError::MalformedField {
            endpoint: endpoint.to_string(),
            field: "<payload>".to_string(),
            reason: format!("expected object or array, found {}", kind_of(other)),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Sort records oldest-first when every record has a `date` string.
pub fn chronological(mut records: Vec<&Record>) -> Vec<&Record> {
    let all_dated = records
        .iter()
        .all(|r| r.get("date").and_then(Value::as_str).is_some());
    if all_dated {
        records.sort_by(|a, b| {
            let da = a.get("date").and_then(Value::as_str).unwrap_or_default();
            let db = b.get("date").and_then(Value::as_str).unwrap_or_default();
            da.cmp(db)
        });
    }
    records
}

/// Read a finite number from a record field.
pub fn number(record: &Record, field: &str) -> Option<f64> {
    let value = match record.get(field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

/// Read a non-empty string from a record field.
pub fn text(record: &Record, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Chronological records of each endpoint a calculator reads.
///
/// Required endpoints must be present and well-formed. Optional endpoints
/// that are absent or unreadable contribute no records.
#[derive(Debug, Default)]
pub struct SourceSet<'a> {
    sources: HashMap<&'static str, Vec<&'a Record>>,
}

impl<'a> SourceSet<'a> {
    pub fn load(
        bundle: &'a RawDataBundle,
        report_type: &str,
        required: &[&'static str],
        optional: &[&'static str],
    ) -> Result<Self, DataError> {
        let mut sources = HashMap::new();
        for &endpoint in required {
            let payload = bundle.require(endpoint, report_type)?;
            sources.insert(endpoint, chronological(records(payload, endpoint)?));
        }
        for &endpoint in optional {
            let Some(payload) = bundle.get(endpoint) else {
                continue;
            };
            match records(payload, endpoint) {
                Ok(found) => {
                    sources.insert(endpoint, chronological(found));
                }
                Err(e) => {
                    tracing::debug!(endpoint, error = %e, "ignoring unreadable optional endpoint");
                }
            }
        }
        Ok(Self { sources })
    }

    pub fn records(&self, endpoint: &str) -> &[&'a Record] {
        self.sources.get(endpoint).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every available value of `field`, oldest first.
    pub fn series(&self, endpoint: &str, field: &str) -> Vec<f64> {
        self.records(endpoint)
            .iter()
            .filter_map(|r| number(r, field))
            .collect()
    }

    /// `numerator / denominator` per record, skipping records where either is
    /// missing or the denominator is zero.
    pub fn ratio_series(&self, endpoint: &str, numerator: &str, denominator: &str) -> Vec<f64> {
        self.records(endpoint)
            .iter()
            .filter_map(|r| {
                let n = number(r, numerator)?;
                let d = number(r, denominator)?;
                (d != 0.0).then(|| n / d)
            })
            .collect()
    }

    /// Most recent available value of `field`.
    pub fn latest(&self, endpoint: &str, field: &str) -> Option<f64> {
        self.records(endpoint)
            .iter()
            .rev()
            .find_map(|r| number(r, field))
    }

    /// Most recent `numerator / denominator` taken from a single record.
    pub fn latest_ratio(&self, endpoint: &str, numerator: &str, denominator: &str) -> Option<f64> {
        self.ratio_series(endpoint, numerator, denominator).last().copied()
    }

    /// First candidate `(endpoint, field)` that yields a value. Used for
    /// "trailing twelve months, falling back to latest annual".
    pub fn first_available(&self, candidates: &[(&str, &str)]) -> Option<f64> {
        candidates
            .iter()
            .find_map(|(endpoint, field)| self.latest(endpoint, field))
    }

    /// Most recent non-empty text value of `field`.
    pub fn text(&self, endpoint: &str, field: &str) -> Option<String> {
        self.records(endpoint)
            .iter()
            .rev()
            .find_map(|r| text(r, field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_payload_is_one_record() {
        let payload = json!({"a": 1});
        assert_eq!(records(&payload, "profile").unwrap().len(), 1);
    }

    #[test]
    fn scalar_payload_is_malformed() {
        let payload = json!("oops");
        let err = records(&payload, "incomeAnnual").unwrap_err();
        assert!(matches!(err, DataError::MalformedField { ref endpoint, .. } if endpoint == "incomeAnnual"));
    }

    #[test]
    fn array_with_non_object_is_malformed() {
        let payload = json!([{"a": 1}, 3]);
        let err = records(&payload, "incomeAnnual").unwrap_err();
        assert!(matches!(err, DataError::MalformedField { ref field, .. } if field == "[1]"));
    }

    #[test]
    fn dated_records_sorted_oldest_first() {
        let payload = json!([
            {"date": "2023-12-31", "revenue": 3},
            {"date": "2021-12-31", "revenue": 1},
            {"date": "2022-12-31", "revenue": 2},
        ]);
        let recs = chronological(records(&payload, "incomeAnnual").unwrap());
        let revenue: Vec<f64> = recs.iter().filter_map(|r| number(r, "revenue")).collect();
        assert_eq!(revenue, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn numbers_read_from_strings_and_reject_garbage() {
        let rec = json!({"a": "1.5", "b": "n/a", "c": null, "d": true});
        let rec = rec.as_object().unwrap();
        assert_eq!(number(rec, "a"), Some(1.5));
        assert_eq!(number(rec, "b"), None);
        assert_eq!(number(rec, "c"), None);
        assert_eq!(number(rec, "d"), None);
        assert_eq!(number(rec, "missing"), None);
    }

    #[test]
    fn optional_endpoint_malformed_is_ignored() {
        let bundle = RawDataBundle::new("ACME")
            .with_endpoint("incomeAnnual", json!([{"revenue": 1}]))
            .with_endpoint("keyMetricsTtm", json!(42));
        let set = SourceSet::load(&bundle, "Overview", &["incomeAnnual"], &["keyMetricsTtm"]).unwrap();
        assert!(set.records("keyMetricsTtm").is_empty());
        assert_eq!(set.latest("incomeAnnual", "revenue"), Some(1.0));
    }

    #[test]
    fn first_available_falls_back() {
        let bundle = RawDataBundle::new("ACME")
            .with_endpoint("ratiosTtm", json!([{"returnOnEquityTTM": null}]))
            .with_endpoint("ratiosAnnual", json!([{"returnOnEquity": 0.21}]));
        let set = SourceSet::load(&bundle, "Scorecard", &["ratiosTtm", "ratiosAnnual"], &[]).unwrap();
        let roe = set.first_available(&[
            ("ratiosTtm", "returnOnEquityTTM"),
            ("ratiosAnnual", "returnOnEquity"),
        ]);
        assert_eq!(roe, Some(0.21));
    }
}
