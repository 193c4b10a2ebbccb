use proptest::prelude::*;
use quill_core::config::MetricsConfig;
use quill_core::models::{RawDataBundle, TrendDirection, TrendKind};
use quill_metrics::growth::series_cagr;
use quill_metrics::{classify_trend, compound_growth_rate, conviction_score, CalculatorRegistry, TrendThresholds};
use serde_json::{json, Value};

fn arb_field() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<f64>().prop_map(|v| json!(v)),
        (-1.0e9..1.0e9f64).prop_map(|v| json!(v)),
        (-1.0e9..1.0e9f64).prop_map(|v| json!(v.to_string())),
        "[a-z]{0,6}".prop_map(Value::String),
        any::<bool>().prop_map(Value::Bool),
    ]
}

fn arb_record(fields: &'static [&'static str]) -> impl Strategy<Value = Value> {
    prop::collection::vec(prop::option::of(arb_field()), fields.len()).prop_map(move |values| {
        let mut map = serde_json::Map::new();
        for (field, value) in fields.iter().zip(values) {
            if let Some(value) = value {
                map.insert((*field).to_string(), value);
            }
        }
        Value::Object(map)
    })
}

const INCOME_FIELDS: &[&str] = &["revenue", "netIncome", "grossProfit", "operatingIncome", "eps"];
const RATIO_FIELDS: &[&str] = &[
    "returnOnEquityTTM",
    "debtEquityRatioTTM",
    "currentRatioTTM",
    "netProfitMarginTTM",
    "peRatioTTM",
    "returnOnEquity",
];

fn arb_bundle() -> impl Strategy<Value = RawDataBundle> {
    (
        prop::collection::vec(arb_record(INCOME_FIELDS), 0..8),
        prop::collection::vec(arb_record(RATIO_FIELDS), 0..3),
        prop::collection::vec(arb_record(&["freeCashFlow", "freeCashFlowYield"]), 0..6),
    )
        .prop_map(|(income, ratios, cash)| {
            RawDataBundle::new("PROP")
                .with_endpoint("profile", json!({"companyName": "Prop Co"}))
                .with_endpoint("incomeAnnual", Value::Array(income))
                .with_endpoint("ratiosTtm", Value::Array(ratios.clone()))
                .with_endpoint("ratiosAnnual", Value::Array(ratios))
                .with_endpoint("keyMetricsAnnual", Value::Array(cash.clone()))
                .with_endpoint("cashFlowAnnual", Value::Array(cash))
                .with_endpoint("peerBenchmark", json!({"peRatio": 20.0}))
        })
}

proptest! {
    #[test]
    fn calculators_never_fail_on_well_shaped_payloads(bundle in arb_bundle()) {
        let registry = CalculatorRegistry::builtin(&MetricsConfig::default());
        for name in registry.names() {
            let out = registry.get(&name).unwrap().calculate(&bundle, "Prop");
            prop_assert!(out.is_ok(), "{} failed: {:?}", name, out.err());
            let out = out.unwrap();
            for metric in out.metrics.values() {
                if let Some(v) = metric.value {
                    prop_assert!(v.is_finite());
                } else {
                    prop_assert!(!metric.is_met);
                }
            }
            if let Some(conviction) = out.conviction {
                prop_assert!(conviction.score <= 100);
            }
        }
    }

    #[test]
    fn growth_is_finite_or_none(start in any::<f64>(), end in any::<f64>(), periods in any::<f64>()) {
        if let Some(rate) = compound_growth_rate(start, end, periods) {
            prop_assert!(rate.is_finite());
            prop_assert!(start > 0.0 && periods > 0.0);
        }
    }

    #[test]
    fn growth_recovers_constant_rate(start in 1.0..1.0e6f64, rate in -0.5..1.0f64, periods in 1usize..10) {
        let series: Vec<f64> = (0..=periods).map(|i| start * (1.0 + rate).powi(i as i32)).collect();
        let recovered = series_cagr(&series, periods).unwrap();
        prop_assert!((recovered - rate).abs() < 1e-6);
    }

    #[test]
    fn constant_series_is_stable(value in -1.0e6..1.0e6f64, len in 3usize..12) {
        let series = vec![value; len];
        let report = classify_trend(&series, 5, TrendKind::Absolute, &TrendThresholds::default());
        prop_assert_eq!(report.direction, TrendDirection::Stable);
    }

    #[test]
    fn short_series_is_insufficient(series in prop::collection::vec(-1.0e6..1.0e6f64, 0..3)) {
        let report = classify_trend(&series, 5, TrendKind::Ratio, &TrendThresholds::default());
        prop_assert_eq!(report.direction, TrendDirection::InsufficientData);
    }

    #[test]
    fn conviction_bounded_and_monotone(results in prop::collection::vec((0.0..5.0f64, any::<bool>()), 0..10)) {
        let score = conviction_score(&results);
        prop_assert!(score.score <= 100);
        let all_met: Vec<(f64, bool)> = results.iter().map(|(w, _)| (*w, true)).collect();
        prop_assert!(conviction_score(&all_met).score >= score.score);
    }
}
