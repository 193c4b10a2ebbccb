use super::error_code::{self, QuillErrorCode};

/// Multi-pass generation errors. Every variant names the stage that failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("stage '{stage}' exceeded its {deadline_ms}ms deadline")]
    Timeout { stage: String, deadline_ms: u64 },

    #[error("stage '{stage}' failed: generation service returned {}: {message}", .status.map(|s| s.to_string()).unwrap_or_else(|| "an error".to_string()))]
    Service {
        stage: String,
        status: Option<u16>,
        message: String,
    },

    #[error("stage '{stage}' produced malformed output: {reason}")]
    MalformedOutput { stage: String, reason: String },

    #[error("generation cancelled during stage '{stage}'")]
    Cancelled { stage: String },

    #[error("report type '{report_type}' has an empty pass strategy")]
    EmptyStrategy { report_type: String },
}

impl GenerationError {
    /// Name of the stage the failure belongs to, if any.
    pub fn stage(&self) -> Option<&str> {
        match self {
            Self::Timeout { stage, .. }
            | Self::Service { stage, .. }
            | Self::MalformedOutput { stage, .. }
            | Self::Cancelled { stage } => Some(stage),
            Self::EmptyStrategy { .. } => None,
        }
    }

    /// Timeouts and cancellations can be retried by the user as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Cancelled { .. })
    }
}

impl QuillErrorCode for GenerationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => error_code::GENERATION_TIMEOUT,
            Self::Service { .. } => error_code::GENERATION_SERVICE,
            Self::MalformedOutput { .. } => error_code::MALFORMED_OUTPUT,
            Self::Cancelled { .. } => error_code::CANCELLED,
            Self::EmptyStrategy { .. } => error_code::EMPTY_STRATEGY,
        }
    }
}
