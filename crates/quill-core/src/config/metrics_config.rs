use serde::{Deserialize, Serialize};

use super::defaults;

/// Calculator tuning shared by every report type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Number of most recent points a trend is classified over.
    pub trend_lookback: usize,
    /// Percent change that counts as movement for ratio series.
    pub ratio_trend_threshold_pct: f64,
    /// Percent change that counts as movement for absolute series.
    pub absolute_trend_threshold_pct: f64,
    /// Maximum number of annual periods a CAGR spans.
    pub cagr_years: usize,
    /// Endpoints fetched longer ago than this are logged as stale.
    pub stale_after_hours: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            trend_lookback: defaults::DEFAULT_TREND_LOOKBACK,
            ratio_trend_threshold_pct: defaults::DEFAULT_RATIO_TREND_THRESHOLD_PCT,
            absolute_trend_threshold_pct: defaults::DEFAULT_ABSOLUTE_TREND_THRESHOLD_PCT,
            cagr_years: defaults::DEFAULT_CAGR_YEARS,
            stale_after_hours: defaults::DEFAULT_STALE_AFTER_HOURS,
        }
    }
}
