use quill_core::errors::DataError;
use quill_core::models::{Metric, MetricBundle, MetricFormat, RawDataBundle, TrendKind};
use quill_core::traits::IMetricCalculator;

use super::CalculatorSettings;
use crate::endpoints::{CASH_FLOW_ANNUAL, INCOME_ANNUAL};
use crate::extract::SourceSet;
use crate::growth::{period_growth, series_cagr};

pub const NAME: &str = "growth_outlook";

/// Multi-year growth rates and cash conversion.
#[derive(Debug, Clone, Default)]
pub struct GrowthOutlookCalculator {
    settings: CalculatorSettings,
}

impl GrowthOutlookCalculator {
    pub fn new(settings: CalculatorSettings) -> Self {
        Self { settings }
    }
}

impl IMetricCalculator for GrowthOutlookCalculator {
    fn name(&self) -> &str {
        NAME
    }

    fn calculate(&self, bundle: &RawDataBundle, report_type: &str) -> Result<MetricBundle, DataError> {
        let sources = SourceSet::load(bundle, report_type, &[INCOME_ANNUAL, CASH_FLOW_ANNUAL], &[])?;
        let mut out = MetricBundle::new(&bundle.subject, report_type);
        let years = self.settings.cagr_years;

        let revenue = sources.series(INCOME_ANNUAL, "revenue");
        let net_income = sources.series(INCOME_ANNUAL, "netIncome");
        let eps = sources.series(INCOME_ANNUAL, "eps");
        let fcf = sources.series(CASH_FLOW_ANNUAL, "freeCashFlow");

        let cagrs = [
            ("revenueCagr", &revenue, 0.05),
            ("netIncomeCagr", &net_income, 0.08),
            ("epsCagr", &eps, 0.08),
            ("freeCashFlowCagr", &fcf, 0.08),
        ];
        for (name, series, floor) in cagrs {
            out.insert_metric(
                name,
                Metric::evaluated(series_cagr(series, years), MetricFormat::Percent, |v| v > floor),
            );
        }
        out.insert_metric(
            "revenueGrowth",
            Metric::evaluated(period_growth(&revenue), MetricFormat::Percent, |v| v > 0.0),
        );

        let conversion = match (fcf.last(), net_income.last()) {
            (Some(f), Some(n)) if *n > 0.0 => Some(f / n),
            _ => None,
        };
        out.insert_metric(
            "fcfConversion",
            Metric::evaluated(conversion, MetricFormat::Percent, |v| v > 0.8),
        );

        out.insert_fact("cagrYears", Some(years.to_string()));
        self.settings
            .insert_trend(&mut out, "revenue", &revenue, TrendKind::Absolute);
        self.settings
            .insert_trend(&mut out, "netIncome", &net_income, TrendKind::Absolute);
        self.settings
            .insert_trend(&mut out, "freeCashFlow", &fcf, TrendKind::Absolute);

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::models::TrendDirection;
    use serde_json::json;

    #[test]
    fn doubling_revenue_over_one_year() {
        let bundle = RawDataBundle::new("ACME")
            .with_endpoint(INCOME_ANNUAL, json!([{"revenue": 100.0, "netIncome": 10.0}, {"revenue": 200.0, "netIncome": 20.0}]))
            .with_endpoint(CASH_FLOW_ANNUAL, json!([{"freeCashFlow": 8.0}, {"freeCashFlow": 18.0}]));
        let out = GrowthOutlookCalculator::default().calculate(&bundle, "GrowthOutlook").unwrap();
        assert_eq!(out.metric("revenueCagr").unwrap().value, Some(1.0));
        assert!((out.metric("fcfConversion").unwrap().value.unwrap() - 0.9).abs() < 1e-12);
        assert!(out.metric("fcfConversion").unwrap().is_met);
        assert_eq!(out.metric("epsCagr").unwrap().value, None);
        assert_eq!(out.trend("revenue").unwrap().direction, TrendDirection::InsufficientData);
    }

    #[test]
    fn loss_making_base_has_no_cagr() {
        let bundle = RawDataBundle::new("ACME")
            .with_endpoint(INCOME_ANNUAL, json!([{"netIncome": -5.0}, {"netIncome": 3.0}]))
            .with_endpoint(CASH_FLOW_ANNUAL, json!([]));
        let out = GrowthOutlookCalculator::default().calculate(&bundle, "GrowthOutlook").unwrap();
        assert_eq!(out.metric("netIncomeCagr").unwrap().value, None);
        assert_eq!(out.metric("fcfConversion").unwrap().value, None);
    }
}
