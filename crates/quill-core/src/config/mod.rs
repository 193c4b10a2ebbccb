//! Configuration system for Quill.
//! TOML-based, 3-layer resolution: env > project file > defaults.

pub mod defaults;
pub mod generation_config;
pub mod metrics_config;
pub mod observability_config;
pub mod quill_config;
pub mod report_type_config;
pub mod storage_config;

pub use generation_config::GenerationConfig;
pub use metrics_config::MetricsConfig;
pub use observability_config::ObservabilityConfig;
pub use quill_config::QuillConfig;
pub use report_type_config::ReportTypeConfig;
pub use storage_config::StorageConfig;
