use super::error_code::{self, QuillErrorCode};
use super::{ConfigError, DataError, GenerationError, StorageError};

/// Top-level error for the Quill pipeline.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum QuillError {
    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type QuillResult<T> = Result<T, QuillError>;

impl QuillErrorCode for QuillError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Data(e) => e.error_code(),
            Self::Generation(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Serialization(_) => error_code::SERIALIZATION,
        }
    }
}
