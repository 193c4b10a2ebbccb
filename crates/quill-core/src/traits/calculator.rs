use crate::errors::DataError;
use crate::models::{MetricBundle, RawDataBundle};

/// Pure transform from a raw bundle to derived metrics for one report type.
///
/// Must be deterministic. Optional fields that are missing resolve to the
/// not-available sentinel; only structurally malformed required data may
/// return an error.
pub trait IMetricCalculator: Send + Sync {
    /// Registry name of this calculator.
    fn name(&self) -> &str;

    fn calculate(&self, bundle: &RawDataBundle, report_type: &str) -> Result<MetricBundle, DataError>;
}
