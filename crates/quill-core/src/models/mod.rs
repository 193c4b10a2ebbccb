//! Data model shared across the pipeline.

pub mod metric;
pub mod raw_data;
pub mod report;
pub mod report_type;

pub use metric::{
    ConvictionBand, ConvictionScore, Interpretation, Metric, MetricBundle, MetricFormat,
    TrendDirection, TrendKind, TrendReport,
};
pub use raw_data::{CachedPayload, RawDataBundle, RawDataRecord};
pub use report::{NewReport, ReportKey, ReportRecord};
pub use report_type::{
    PassStrategy, ReportTypeSpec, StageDescriptor, StageOutput, ThresholdBand, ThresholdTable,
};
