//! Error handling for Quill.
//! One error enum per subsystem, `thiserror` only, aggregated into `QuillError`.

pub mod config_error;
pub mod data_error;
pub mod error_code;
pub mod generation_error;
pub mod quill_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use data_error::DataError;
pub use error_code::QuillErrorCode;
pub use generation_error::GenerationError;
pub use quill_error::{QuillError, QuillResult};
pub use storage_error::StorageError;
