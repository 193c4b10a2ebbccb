//! Stable machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// for callers that branch on failure kind (retry buttons, refresh prompts).
pub trait QuillErrorCode {
    /// Returns the error code string (e.g., "GENERATION_TIMEOUT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const DATA_UNAVAILABLE: &str = "DATA_UNAVAILABLE";
pub const MALFORMED_FIELD: &str = "MALFORMED_FIELD";
pub const GENERATION_TIMEOUT: &str = "GENERATION_TIMEOUT";
pub const GENERATION_SERVICE: &str = "GENERATION_SERVICE";
pub const MALFORMED_OUTPUT: &str = "MALFORMED_OUTPUT";
pub const CANCELLED: &str = "CANCELLED";
pub const EMPTY_STRATEGY: &str = "EMPTY_STRATEGY";
pub const PERSISTENCE: &str = "PERSISTENCE";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const UNKNOWN_REPORT_TYPE: &str = "UNKNOWN_REPORT_TYPE";
pub const SERIALIZATION: &str = "SERIALIZATION";
