use super::error_code::{self, QuillErrorCode};

/// Configuration and report-type registry errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    #[error("failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("invalid config value for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("unknown report type: {name}")]
    UnknownReportType { name: String },

    #[error("unknown metric calculator: {name}")]
    UnknownCalculator { name: String },
}

impl QuillErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownReportType { .. } => error_code::UNKNOWN_REPORT_TYPE,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
