//! # quill-core
//!
//! Foundation crate for the Quill report pipeline.
//! Defines the data model, collaborator traits, errors, config, and the
//! placeholder template compiler shared by prompts and interpretation text.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod template;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::QuillConfig;
pub use errors::{QuillError, QuillResult};
pub use models::{
    Metric, MetricBundle, MetricFormat, RawDataBundle, ReportKey, ReportRecord, ReportTypeSpec,
};
