use quill_core::errors::DataError;
use quill_core::models::{MetricBundle, RawDataBundle, TrendKind};
use quill_core::traits::IMetricCalculator;

use super::CalculatorSettings;
use crate::endpoints::{INCOME_ANNUAL, KEY_METRICS_ANNUAL, KEY_METRICS_TTM, RATIOS_ANNUAL, RATIOS_TTM};
use crate::extract::SourceSet;
use crate::scorecard::{conviction_score, default_criteria, Criterion};

pub const NAME: &str = "scorecard";

/// Pass/fail quality criteria rolled up into a conviction score.
#[derive(Debug, Clone)]
pub struct ScorecardCalculator {
    settings: CalculatorSettings,
    criteria: Vec<Criterion>,
}

impl ScorecardCalculator {
    pub fn new(settings: CalculatorSettings) -> Self {
        Self {
            settings,
            criteria: default_criteria(),
        }
    }

    pub fn with_criteria(mut self, criteria: Vec<Criterion>) -> Self {
        self.criteria = criteria;
        self
    }
}

impl Default for ScorecardCalculator {
    fn default() -> Self {
        Self::new(CalculatorSettings::default())
    }
}

impl IMetricCalculator for ScorecardCalculator {
    fn name(&self) -> &str {
        NAME
    }

    fn calculate(&self, bundle: &RawDataBundle, report_type: &str) -> Result<MetricBundle, DataError> {
        let sources = SourceSet::load(
            bundle,
            report_type,
            &[RATIOS_TTM, RATIOS_ANNUAL, KEY_METRICS_ANNUAL, INCOME_ANNUAL],
            &[KEY_METRICS_TTM],
        )?;
        let mut out = MetricBundle::new(&bundle.subject, report_type);

        let mut results = Vec::with_capacity(self.criteria.len());
        for criterion in &self.criteria {
            let metric = criterion.evaluate(&sources, self.settings.cagr_years);
            results.push((criterion.weight, metric.is_met));
            out.insert_metric(criterion.name, metric);
        }
        out.conviction = Some(conviction_score(&results));

        self.settings.insert_trend(
            &mut out,
            "returnOnEquity",
            &sources.series(RATIOS_ANNUAL, "returnOnEquity"),
            TrendKind::Ratio,
        );
        self.settings
            .field_trend(&mut out, &sources, INCOME_ANNUAL, "revenue", TrendKind::Absolute);

        Ok(out)
    }
}
