//! Collaborator contracts. The pipeline is generic over these; concrete
//! implementations live in `quill-storage`, `quill-generation` and
//! `quill-metrics`.

pub mod calculator;
pub mod raw_data_cache;
pub mod report_store;
pub mod text_generator;

pub use calculator::IMetricCalculator;
pub use raw_data_cache::IRawDataCache;
pub use report_store::IReportStore;
pub use text_generator::{GenerationFailure, ITextGenerator};
