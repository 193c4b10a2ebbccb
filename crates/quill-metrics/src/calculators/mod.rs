//! Built-in calculators, one per report type.

pub mod growth_outlook;
pub mod overview;
pub mod peer;
pub mod scorecard;

pub use growth_outlook::GrowthOutlookCalculator;
pub use overview::OverviewCalculator;
pub use peer::PeerComparisonCalculator;
pub use scorecard::ScorecardCalculator;

use quill_core::config::MetricsConfig;
use quill_core::models::{MetricBundle, TrendKind};

use crate::extract::SourceSet;
use crate::trend::{classify_trend, TrendThresholds};

/// Tuning shared by the built-in calculators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorSettings {
    pub lookback: usize,
    pub thresholds: TrendThresholds,
    pub cagr_years: usize,
}

impl CalculatorSettings {
    pub fn from_config(config: &MetricsConfig) -> Self {
        Self {
            lookback: config.trend_lookback,
            thresholds: TrendThresholds::from_config(config),
            cagr_years: config.cagr_years,
        }
    }

    /// Classify `series` and record it under `name`.
    pub(crate) fn insert_trend(
        &self,
        bundle: &mut MetricBundle,
        name: &str,
        series: &[f64],
        kind: TrendKind,
    ) {
        bundle.insert_trend(
            name,
            classify_trend(series, self.lookback, kind, &self.thresholds),
        );
    }

    pub(crate) fn field_trend(
        &self,
        bundle: &mut MetricBundle,
        sources: &SourceSet<'_>,
        endpoint: &str,
        field: &str,
        kind: TrendKind,
    ) {
        self.insert_trend(bundle, field, &sources.series(endpoint, field), kind);
    }
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self::from_config(&MetricsConfig::default())
    }
}
