// Single source of truth for all default values.

// --- Generation ---
pub const DEFAULT_STAGE_DEADLINE_MS: u64 = 45_000;
pub const DEFAULT_SERIALIZE_PER_KEY: bool = true;
pub const DEFAULT_GENERATION_MODEL: &str = "default";
pub const DEFAULT_API_KEY_ENV: &str = "QUILL_GENERATION_API_KEY";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4_096;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "quill.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Metrics ---
pub const DEFAULT_TREND_LOOKBACK: usize = 5;
pub const DEFAULT_RATIO_TREND_THRESHOLD_PCT: f64 = 5.0;
pub const DEFAULT_ABSOLUTE_TREND_THRESHOLD_PCT: f64 = 10.0;
pub const DEFAULT_CAGR_YEARS: usize = 5;
pub const DEFAULT_STALE_AFTER_HOURS: u64 = 168; // 7 days

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;

/// Minimum points a trend window needs before it is classified.
pub const MIN_TREND_POINTS: usize = 3;
