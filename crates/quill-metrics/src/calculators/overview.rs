use quill_core::errors::DataError;
use quill_core::models::{Metric, MetricBundle, MetricFormat, RawDataBundle, TrendKind};
use quill_core::traits::IMetricCalculator;

use super::CalculatorSettings;
use crate::endpoints::{INCOME_ANNUAL, KEY_METRICS_TTM, PROFILE};
use crate::extract::SourceSet;
use crate::growth::{period_growth, series_cagr};

pub const NAME: &str = "overview";

/// Company snapshot: profile facts, headline margins, revenue growth and
/// income trends.
#[derive(Debug, Clone, Default)]
pub struct OverviewCalculator {
    settings: CalculatorSettings,
}

impl OverviewCalculator {
    pub fn new(settings: CalculatorSettings) -> Self {
        Self { settings }
    }
}

impl IMetricCalculator for OverviewCalculator {
    fn name(&self) -> &str {
        NAME
    }

    fn calculate(&self, bundle: &RawDataBundle, report_type: &str) -> Result<MetricBundle, DataError> {
        let sources = SourceSet::load(bundle, report_type, &[PROFILE, INCOME_ANNUAL], &[KEY_METRICS_TTM])?;
        let mut out = MetricBundle::new(&bundle.subject, report_type);

        for fact in ["companyName", "sector", "industry", "currency", "exchange"] {
            out.insert_fact(fact, sources.text(PROFILE, fact));
        }

        let revenue = sources.series(INCOME_ANNUAL, "revenue");
        out.insert_metric(
            "revenueGrowth",
            Metric::evaluated(period_growth(&revenue), MetricFormat::Percent, |v| v > 0.0),
        );
        out.insert_metric(
            "revenueCagr",
            Metric::evaluated(
                series_cagr(&revenue, self.settings.cagr_years),
                MetricFormat::Percent,
                |v| v > 0.05,
            ),
        );
        out.insert_metric(
            "netMargin",
            Metric::evaluated(
                sources.latest_ratio(INCOME_ANNUAL, "netIncome", "revenue"),
                MetricFormat::Percent,
                |v| v > 0.10,
            ),
        );
        out.insert_metric(
            "operatingMargin",
            Metric::evaluated(
                sources.latest_ratio(INCOME_ANNUAL, "operatingIncome", "revenue"),
                MetricFormat::Percent,
                |v| v > 0.15,
            ),
        );
        out.insert_metric(
            "grossMargin",
            Metric::evaluated(
                sources.latest_ratio(INCOME_ANNUAL, "grossProfit", "revenue"),
                MetricFormat::Percent,
                |v| v > 0.40,
            ),
        );
        let market_cap = sources.first_available(&[
            (PROFILE, "mktCap"),
            (PROFILE, "marketCap"),
            (KEY_METRICS_TTM, "marketCapTTM"),
        ]);
        out.insert_metric(
            "marketCap",
            Metric::evaluated(market_cap, MetricFormat::Decimal, |v| v > 0.0),
        );

        self.settings
            .insert_trend(&mut out, "revenue", &revenue, TrendKind::Absolute);
        self.settings
            .field_trend(&mut out, &sources, INCOME_ANNUAL, "netIncome", TrendKind::Absolute);
        self.settings.insert_trend(
            &mut out,
            "netMargin",
            &sources.ratio_series(INCOME_ANNUAL, "netIncome", "revenue"),
            TrendKind::Ratio,
        );

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::models::TrendDirection;
    use serde_json::json;

    fn bundle() -> RawDataBundle {
        RawDataBundle::new("ACME")
            .with_endpoint(
                PROFILE,
                json!([{"companyName": "Acme Corp", "sector": "Industrials", "mktCap": 5.0e9}]),
            )
            .with_endpoint(
                INCOME_ANNUAL,
                json!([
                    {"date": "2020-12-31", "revenue": 100.0, "netIncome": 10.0, "grossProfit": 45.0},
                    {"date": "2021-12-31", "revenue": 100.0, "netIncome": 11.0, "grossProfit": 45.0},
                    {"date": "2022-12-31", "revenue": 100.0, "netIncome": 11.0, "grossProfit": 46.0},
                    {"date": "2023-12-31", "revenue": 130.0, "netIncome": 15.0, "grossProfit": 60.0},
                    {"date": "2024-12-31", "revenue": 130.0, "netIncome": 16.0, "grossProfit": 61.0}
                ]),
            )
    }

    #[test]
    fn computes_snapshot() {
        let out = OverviewCalculator::default().calculate(&bundle(), "Overview").unwrap();
        assert_eq!(out.subject, "ACME");
        assert_eq!(out.facts["companyName"], "Acme Corp");
        assert!(!out.facts.contains_key("industry"));
        assert_eq!(out.trend("revenue").unwrap().direction, TrendDirection::Improving);
        assert_eq!(out.metric("revenueGrowth").unwrap().value, Some(0.0));
        assert!(out.metric("grossMargin").unwrap().is_met);
        assert_eq!(out.metric("marketCap").unwrap().value, Some(5.0e9));
    }

    #[test]
    fn missing_optional_fields_are_sentinels() {
        let out = OverviewCalculator::default().calculate(&bundle(), "Overview").unwrap();
        let op = out.metric("operatingMargin").unwrap();
        assert_eq!(op.value, None);
        assert!(!op.is_met);
    }

    #[test]
    fn missing_required_endpoint_is_unavailable() {
        let bundle = RawDataBundle::new("ACME").with_endpoint(PROFILE, json!({}));
        let err = OverviewCalculator::default().calculate(&bundle, "Overview").unwrap_err();
        assert!(matches!(err, DataError::DataUnavailable { ref missing, .. } if missing == &vec![INCOME_ANNUAL.to_string()]));
    }
}
