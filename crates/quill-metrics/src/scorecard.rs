//! Pass/fail scorecard criteria and the weighted conviction score.

use quill_core::models::{ConvictionBand, ConvictionScore, Metric, MetricFormat};

use crate::endpoints::{INCOME_ANNUAL, KEY_METRICS_ANNUAL, KEY_METRICS_TTM, RATIOS_ANNUAL, RATIOS_TTM};
use crate::extract::SourceSet;
use crate::growth::series_cagr;

/// Fixed predicate a criterion evaluates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison {
    Above(f64),
    Below(f64),
}

impl Comparison {
    pub fn test(self, value: f64) -> bool {
        match self {
            Self::Above(threshold) => value > threshold,
            Self::Below(threshold) => value < threshold,
        }
    }
}

/// Where a criterion's point value comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueSource {
    /// Latest value of the first candidate that has one (TTM before annual).
    Latest(&'static [(&'static str, &'static str)]),
    /// CAGR of an annual series over the configured number of years.
    Cagr {
        endpoint: &'static str,
        field: &'static str,
    },
    /// `numerator / denominator` from the most recent record carrying both.
    Ratio {
        endpoint: &'static str,
        numerator: &'static str,
        denominator: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Criterion {
    pub name: &'static str,
    pub source: ValueSource,
    pub comparison: Comparison,
    pub weight: f64,
    pub format: MetricFormat,
}

impl Criterion {
    pub fn value(&self, sources: &SourceSet<'_>, cagr_years: usize) -> Option<f64> {
        match self.source {
            ValueSource::Latest(candidates) => sources.first_available(candidates),
            ValueSource::Cagr { endpoint, field } => {
                series_cagr(&sources.series(endpoint, field), cagr_years)
            }
            ValueSource::Ratio {
                endpoint,
                numerator,
                denominator,
            } => sources.latest_ratio(endpoint, numerator, denominator),
        }
    }

    /// Pull the point value and run the predicate. Missing values yield the
    /// not-available sentinel.
    pub fn evaluate(&self, sources: &SourceSet<'_>, cagr_years: usize) -> Metric {
        let comparison = self.comparison;
        Metric::evaluated(self.value(sources, cagr_years), self.format, move |v| {
            comparison.test(v)
        })
    }
}

/// The quality scorecard.
pub fn default_criteria() -> Vec<Criterion> {
    vec![
        Criterion {
            name: "returnOnEquity",
            source: ValueSource::Latest(&[
                (RATIOS_TTM, "returnOnEquityTTM"),
                (RATIOS_ANNUAL, "returnOnEquity"),
            ]),
            comparison: Comparison::Above(0.15),
            weight: 2.0,
            format: MetricFormat::Percent,
        },
        Criterion {
            name: "debtToEquity",
            source: ValueSource::Latest(&[
                (RATIOS_TTM, "debtEquityRatioTTM"),
                (RATIOS_ANNUAL, "debtEquityRatio"),
            ]),
            comparison: Comparison::Below(0.5),
            weight: 1.5,
            format: MetricFormat::Decimal,
        },
        Criterion {
            name: "currentRatio",
            source: ValueSource::Latest(&[
                (RATIOS_TTM, "currentRatioTTM"),
                (RATIOS_ANNUAL, "currentRatio"),
            ]),
            comparison: Comparison::Above(1.5),
            weight: 1.0,
            format: MetricFormat::Decimal,
        },
        Criterion {
            name: "grossMargin",
            source: ValueSource::Latest(&[
                (RATIOS_TTM, "grossProfitMarginTTM"),
                (RATIOS_ANNUAL, "grossProfitMargin"),
            ]),
            comparison: Comparison::Above(0.40),
            weight: 1.0,
            format: MetricFormat::Percent,
        },
        Criterion {
            name: "netMargin",
            source: ValueSource::Latest(&[
                (RATIOS_TTM, "netProfitMarginTTM"),
                (RATIOS_ANNUAL, "netProfitMargin"),
            ]),
            comparison: Comparison::Above(0.10),
            weight: 1.5,
            format: MetricFormat::Percent,
        },
        Criterion {
            name: "freeCashFlowYield",
            source: ValueSource::Latest(&[
                (KEY_METRICS_TTM, "freeCashFlowYieldTTM"),
                (KEY_METRICS_ANNUAL, "freeCashFlowYield"),
            ]),
            comparison: Comparison::Above(0.04),
            weight: 1.0,
            format: MetricFormat::Percent,
        },
        Criterion {
            name: "revenueCagr",
            source: ValueSource::Cagr {
                endpoint: INCOME_ANNUAL,
                field: "revenue",
            },
            comparison: Comparison::Above(0.05),
            weight: 1.5,
            format: MetricFormat::Percent,
        },
        Criterion {
            name: "interestCoverage",
            source: ValueSource::Latest(&[
                (RATIOS_TTM, "interestCoverageTTM"),
                (RATIOS_ANNUAL, "interestCoverage"),
            ]),
            comparison: Comparison::Above(5.0),
            weight: 1.0,
            format: MetricFormat::Decimal,
        },
    ]
}

/// Weighted share of met criteria, normalized to 0-100 and rounded.
/// A scorecard with no weight scores 0.
pub fn conviction_score(results: &[(f64, bool)]) -> ConvictionScore {
    let total: f64 = results.iter().map(|(w, _)| w.max(0.0)).sum();
    let met: f64 = results
        .iter()
        .filter(|(_, is_met)| *is_met)
        .map(|(w, _)| w.max(0.0))
        .sum();
    let score = if total > 0.0 {
        (met / total * 100.0).round().clamp(0.0, 100.0) as u8
    } else {
        0
    };
    ConvictionScore {
        score,
        band: ConvictionBand::from_score(score),
        criteria_met: results.iter().filter(|(_, is_met)| *is_met).count(),
        criteria_total: results.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::models::RawDataBundle;
    use serde_json::json;

    #[test]
    fn conviction_all_met_is_high() {
        let score = conviction_score(&[(2.0, true), (1.0, true)]);
        assert_eq!(score.score, 100);
        assert_eq!(score.band, ConvictionBand::High);
        assert_eq!(score.criteria_met, 2);
    }

    #[test]
    fn conviction_is_weighted() {
        // 2 of 4 weight met.
        let score = conviction_score(&[(2.0, true), (1.0, false), (1.0, false)]);
        assert_eq!(score.score, 50);
        assert_eq!(score.band, ConvictionBand::Low);
        assert_eq!(score.criteria_met, 1);
        assert_eq!(score.criteria_total, 3);
    }

    #[test]
    fn conviction_empty_is_zero() {
        let score = conviction_score(&[]);
        assert_eq!(score.score, 0);
        assert_eq!(score.band, ConvictionBand::Low);
    }

    #[test]
    fn criterion_falls_back_to_annual() {
        let bundle = RawDataBundle::new("ACME")
            .with_endpoint(RATIOS_TTM, json!([{}]))
            .with_endpoint(RATIOS_ANNUAL, json!([{"returnOnEquity": 0.22}]));
        let sources = SourceSet::load(&bundle, "Scorecard", &[RATIOS_TTM, RATIOS_ANNUAL], &[]).unwrap();
        let roe = default_criteria()
            .into_iter()
            .find(|c| c.name == "returnOnEquity")
            .unwrap();
        let metric = roe.evaluate(&sources, 5);
        assert_eq!(metric.value, Some(0.22));
        assert!(metric.is_met);
    }

    #[test]
    fn missing_value_is_sentinel() {
        let bundle = RawDataBundle::new("ACME").with_endpoint(RATIOS_TTM, json!([{}]));
        let sources = SourceSet::load(&bundle, "Scorecard", &[RATIOS_TTM], &[]).unwrap();
        for criterion in default_criteria() {
            let metric = criterion.evaluate(&sources, 5);
            assert_eq!(metric.value, None, "{}", criterion.name);
            assert!(!metric.is_met);
        }
    }

    #[test]
    fn below_comparison() {
        assert!(Comparison::Below(0.5).test(0.3));
        assert!(!Comparison::Below(0.5).test(0.5));
        assert!(!Comparison::Above(0.5).test(0.5));
    }
}
