//! Dependency gate between the raw data cache and everything downstream.

use std::collections::HashSet;

use quill_core::errors::DataError;
use quill_core::models::ReportTypeSpec;

/// Whether a report type can run against what is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub ready: bool,
    /// Missing endpoints in the report type's declared order.
    pub missing: Vec<String>,
}

impl Resolution {
    /// `Ok` when ready, otherwise `DataUnavailable` naming the missing endpoints.
    pub fn into_result(self, subject: &str, report_type: &str) -> Result<(), DataError> {
        if self.ready {
            Ok(())
        } else {
            Err(DataError::DataUnavailable {
                subject: subject.to_string(),
                report_type: report_type.to_string(),
                missing: self.missing,
            })
        }
    }
}

/// Ready iff every required endpoint is available. Pure; no I/O.
pub fn resolve(spec: &ReportTypeSpec, available: &HashSet<String>) -> Resolution {
    let mut missing = Vec::new();
    for endpoint in &spec.required_endpoints {
        if !available.contains(endpoint) && !missing.contains(endpoint) {
            missing.push(endpoint.clone());
        }
    }
    Resolution {
        ready: missing.is_empty(),
        missing,
    }
}
