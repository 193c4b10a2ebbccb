//! Interpretation mapper: metric value to qualitative category and sentence.

use std::collections::BTreeMap;

use quill_core::models::{Interpretation, MetricBundle, MetricFormat, ThresholdBand, ThresholdTable};
use quill_core::template::{compile, substitutions};

pub const NOT_AVAILABLE: &str = "Not available";
pub const UNCLASSIFIED: &str = "Unclassified";

/// Bucket `value` with `table`. Deterministic; the first matching band wins.
pub fn interpret(metric_name: &str, value: Option<f64>, table: &ThresholdTable) -> Interpretation {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return Interpretation {
            category: NOT_AVAILABLE.to_string(),
            text: format!("{} is not available.", table.label),
        };
    };
    let rendered = table.format.render(value);
    match table.band_for(value) {
        Some(band) => {
            let subs = substitutions([
                ("label", table.label.as_str()),
                ("value", rendered.as_str()),
                ("category", band.category.as_str()),
                ("metric", metric_name),
            ]);
            Interpretation {
                category: band.category.clone(),
                text: compile(&band.text, &subs),
            }
        }
        None => Interpretation {
            category: UNCLASSIFIED.to_string(),
            text: format!("{} is {}.", table.label, rendered),
        },
    }
}

/// Attach an interpretation to every metric that has a table.
pub fn interpret_bundle(bundle: &mut MetricBundle, tables: &BTreeMap<String, ThresholdTable>) {
    for (name, metric) in bundle.metrics.iter_mut() {
        if let Some(table) = tables.get(name) {
            metric.interpretation = Some(interpret(name, metric.value, table));
        }
    }
}

fn band(min: Option<f64>, max: Option<f64>, category: &str, text: &str) -> ThresholdBand {
    ThresholdBand {
        min,
        max,
        category: category.to_string(),
        text: text.to_string(),
    }
}

/// Three-tier table where higher values are better.
fn higher_better(label: &str, format: MetricFormat, strong: f64, moderate: f64) -> ThresholdTable {
    ThresholdTable {
        label: label.to_string(),
        format,
        bands: vec![
            band(Some(strong), None, "Strong", "{label} of {value} is strong."),
            band(Some(moderate), Some(strong), "Moderate", "{label} of {value} is moderate."),
            band(None, Some(moderate), "Weak", "{label} of {value} is weak."),
        ],
    }
}

/// Three-tier table where lower values are better.
fn lower_better(label: &str, format: MetricFormat, strong: f64, moderate: f64) -> ThresholdTable {
    ThresholdTable {
        label: label.to_string(),
        format,
        bands: vec![
            band(None, Some(strong), "Strong", "{label} of {value} is comfortably low."),
            band(Some(strong), Some(moderate), "Moderate", "{label} of {value} is manageable."),
            band(Some(moderate), None, "Weak", "{label} of {value} is elevated."),
        ],
    }
}

/// Built-in interpretation tables keyed by metric name.
pub fn default_tables() -> BTreeMap<String, ThresholdTable> {
    use MetricFormat::{Decimal, Percent};

    let tables = [
        ("returnOnEquity", higher_better("Return on equity", Percent, 0.15, 0.08)),
        ("netMargin", higher_better("Net margin", Percent, 0.10, 0.05)),
        ("operatingMargin", higher_better("Operating margin", Percent, 0.15, 0.08)),
        ("grossMargin", higher_better("Gross margin", Percent, 0.40, 0.25)),
        ("currentRatio", higher_better("Current ratio", Decimal, 1.5, 1.0)),
        ("interestCoverage", higher_better("Interest coverage", Decimal, 5.0, 2.0)),
        ("freeCashFlowYield", higher_better("Free cash flow yield", Percent, 0.04, 0.02)),
        ("debtToEquity", lower_better("Debt to equity", Decimal, 0.5, 1.5)),
        ("revenueGrowth", higher_better("Revenue growth", Percent, 0.10, 0.03)),
        ("revenueCagr", higher_better("Revenue CAGR", Percent, 0.05, 0.02)),
        ("netIncomeCagr", higher_better("Net income CAGR", Percent, 0.08, 0.02)),
        ("epsCagr", higher_better("EPS CAGR", Percent, 0.08, 0.02)),
        ("freeCashFlowCagr", higher_better("Free cash flow CAGR", Percent, 0.08, 0.02)),
        ("fcfConversion", higher_better("Free cash flow conversion", Percent, 0.8, 0.5)),
    ];
    tables
        .into_iter()
        .map(|(name, table)| (name.to_string(), table))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::models::Metric;

    #[test]
    fn buckets_and_templates_text() {
        let tables = default_tables();
        let out = interpret("returnOnEquity", Some(0.21), &tables["returnOnEquity"]);
        assert_eq!(out.category, "Strong");
        assert_eq!(out.text, "Return on equity of 21.0% is strong.");
    }

    #[test]
    fn band_boundaries() {
        let table = &default_tables()["netMargin"];
        assert_eq!(interpret("netMargin", Some(0.10), table).category, "Strong");
        assert_eq!(interpret("netMargin", Some(0.0999), table).category, "Moderate");
        assert_eq!(interpret("netMargin", Some(-0.2), table).category, "Weak");
    }

    #[test]
    fn lower_is_better_table() {
        let table = &default_tables()["debtToEquity"];
        assert_eq!(interpret("debtToEquity", Some(0.2), table).category, "Strong");
        assert_eq!(interpret("debtToEquity", Some(2.0), table).category, "Weak");
    }

    #[test]
    fn missing_value_is_not_available() {
        let table = &default_tables()["currentRatio"];
        let out = interpret("currentRatio", None, table);
        assert_eq!(out.category, NOT_AVAILABLE);
        assert_eq!(out.text, "Current ratio is not available.");
    }

    #[test]
    fn gap_in_bands_is_unclassified() {
        let table = ThresholdTable {
            label: "X".into(),
            format: MetricFormat::Decimal,
            bands: vec![band(Some(1.0), None, "High", "{label} high")],
        };
        let out = interpret("x", Some(0.5), &table);
        assert_eq!(out.category, UNCLASSIFIED);
        assert_eq!(out.text, "X is 0.50.");
    }

    #[test]
    fn bundle_only_gets_tables_it_has() {
        let mut bundle = MetricBundle::new("ACME", "Overview");
        bundle.insert_metric("netMargin", Metric::evaluated(Some(0.12), MetricFormat::Percent, |v| v > 0.1));
        bundle.insert_metric("mystery", Metric::not_available(MetricFormat::Decimal));
        interpret_bundle(&mut bundle, &default_tables());
        assert_eq!(bundle.metric("netMargin").unwrap().interpretation.as_ref().unwrap().category, "Strong");
        assert!(bundle.metric("mystery").unwrap().interpretation.is_none());
    }
}
