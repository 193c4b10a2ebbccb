use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How a metric value is rendered for humans and prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricFormat {
    Percent,
    #[default]
    Decimal,
}

impl MetricFormat {
    /// Render a value: `0.153` as `15.3%` or `0.15`.
    pub fn render(self, value: f64) -> String {
        match self {
            Self::Percent => format!("{:.1}%", value * 100.0),
            Self::Decimal => format!("{value:.2}"),
        }
    }
}

/// Qualitative bucket for a metric value plus an explanatory sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    pub category: String,
    pub text: String,
}

/// One derived metric. `value = None` is the "not available" sentinel and
/// always carries `is_met = false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub value: Option<f64>,
    pub is_met: bool,
    pub format: MetricFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<Interpretation>,
}

impl Metric {
    /// A metric whose pass/fail predicate was evaluated against `value`.
    pub fn evaluated(value: Option<f64>, format: MetricFormat, predicate: impl Fn(f64) -> bool) -> Self {
        let value = value.filter(|v| v.is_finite());
        Self {
            value,
            is_met: value.is_some_and(predicate),
            format,
            interpretation: None,
        }
    }

    pub fn not_available(format: MetricFormat) -> Self {
        Self {
            value: None,
            is_met: false,
            format,
            interpretation: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.value.is_some()
    }
}

/// Whether a trend threshold applies to a ratio or an absolute series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendKind {
    /// Ratios and percentages (margins, returns). Tighter threshold.
    Ratio,
    /// Absolute amounts (revenue, income).
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    #[serde(rename = "improving")]
    Improving,
    #[serde(rename = "stable")]
    Stable,
    #[serde(rename = "declining")]
    Declining,
    #[serde(rename = "insufficient data")]
    InsufficientData,
}

impl TrendDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Declining => "declining",
            Self::InsufficientData => "insufficient data",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a numeric time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub direction: TrendDirection,
    /// Percentage change between the half-window means, when defined.
    pub change_pct: Option<f64>,
    /// Number of points in the classified window.
    pub points: usize,
    pub kind: TrendKind,
}

impl TrendReport {
    pub fn insufficient(points: usize, kind: TrendKind) -> Self {
        Self {
            direction: TrendDirection::InsufficientData,
            change_pct: None,
            points,
            kind,
        }
    }
}

/// Qualitative tier of a conviction score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvictionBand {
    Low,
    Medium,
    High,
}

impl ConvictionBand {
    /// `<=50` low, `51..=75` medium, `>75` high.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=50 => Self::Low,
            51..=75 => Self::Medium,
            _ => Self::High,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ConvictionBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weighted 0-100 composite over pass/fail scorecard criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvictionScore {
    pub score: u8,
    pub band: ConvictionBand,
    pub criteria_met: usize,
    pub criteria_total: usize,
}

/// Everything a calculator derives from one raw bundle for one report type.
/// Recomputed on every request; never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricBundle {
    pub subject: String,
    pub report_type: String,
    /// Descriptive facts (name, sector, currency) lifted from the raw data.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub facts: BTreeMap<String, String>,
    pub metrics: BTreeMap<String, Metric>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub trends: BTreeMap<String, TrendReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conviction: Option<ConvictionScore>,
}

impl MetricBundle {
    pub fn new(subject: impl Into<String>, report_type: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            report_type: report_type.into(),
            ..Default::default()
        }
    }

    pub fn metric(&self, name: &str) -> Option<&Metric> {
        self.metrics.get(name)
    }

    pub fn trend(&self, name: &str) -> Option<&TrendReport> {
        self.trends.get(name)
    }

    pub fn insert_metric(&mut self, name: impl Into<String>, metric: Metric) {
        self.metrics.insert(name.into(), metric);
    }

    pub fn insert_trend(&mut self, name: impl Into<String>, trend: TrendReport) {
        self.trends.insert(name.into(), trend);
    }

    pub fn insert_fact(&mut self, name: impl Into<String>, value: Option<String>) {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.facts.insert(name.into(), value);
        }
    }

    /// Count of metrics that resolved to a value.
    pub fn available_count(&self) -> usize {
        self.metrics.values().filter(|m| m.is_available()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conviction_band_edges() {
        assert_eq!(ConvictionBand::from_score(0), ConvictionBand::Low);
        assert_eq!(ConvictionBand::from_score(50), ConvictionBand::Low);
        assert_eq!(ConvictionBand::from_score(51), ConvictionBand::Medium);
        assert_eq!(ConvictionBand::from_score(75), ConvictionBand::Medium);
        assert_eq!(ConvictionBand::from_score(76), ConvictionBand::High);
        assert_eq!(ConvictionBand::from_score(100), ConvictionBand::High);
    }

    #[test]
    fn evaluated_metric_rejects_non_finite_values() {
        let m = Metric::evaluated(Some(f64::NAN), MetricFormat::Percent, |v| v > 0.0);
        assert_eq!(m.value, None);
        assert!(!m.is_met);
    }

    #[test]
    fn metric_serializes_with_camel_case_flags() {
        let m = Metric::evaluated(Some(0.2), MetricFormat::Percent, |v| v > 0.15);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["isMet"], true);
        assert_eq!(json["format"], "percent");
        assert!(json.get("interpretation").is_none());
    }

    #[test]
    fn trend_direction_serializes_human_labels() {
        let json = serde_json::to_string(&TrendDirection::InsufficientData).unwrap();
        assert_eq!(json, "\"insufficient data\"");
    }

    #[test]
    fn percent_render() {
        assert_eq!(MetricFormat::Percent.render(0.153), "15.3%");
        assert_eq!(MetricFormat::Decimal.render(1.5), "1.50");
    }
}
