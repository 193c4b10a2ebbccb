use super::error_code::{self, QuillErrorCode};

/// Report store and raw cache errors. Surfaced as-is, never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("persistence error during {operation}: {message}")]
    Persistence { operation: String, message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },
}

impl QuillErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Persistence { .. } => error_code::PERSISTENCE,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
        }
    }
}
