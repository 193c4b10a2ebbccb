use super::error_code::{self, QuillErrorCode};

/// Raw-data errors raised before any generation work starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    /// Required endpoints are not cached for the subject. Recoverable by
    /// refreshing the listed endpoints and resolving again.
    #[error("data unavailable for {subject}/{report_type}: missing endpoints [{}]", .missing.join(", "))]
    DataUnavailable {
        subject: String,
        report_type: String,
        missing: Vec<String>,
    },

    /// A field the resolver guaranteed as present is structurally corrupt.
    #[error("malformed field {endpoint}.{field}: {reason}")]
    MalformedField {
        endpoint: String,
        field: String,
        reason: String,
    },
}

impl QuillErrorCode for DataError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DataUnavailable { .. } => error_code::DATA_UNAVAILABLE,
            Self::MalformedField { .. } => error_code::MALFORMED_FIELD,
        }
    }
}
