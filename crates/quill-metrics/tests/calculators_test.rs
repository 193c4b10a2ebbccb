use quill_core::config::MetricsConfig;
use quill_core::models::{ConvictionBand, TrendDirection};
use quill_metrics::{default_tables, interpret_bundle, CalculatorRegistry};
use test_fixtures::load_bundle;

fn registry() -> CalculatorRegistry {
    CalculatorRegistry::builtin(&MetricsConfig::default())
}

#[test]
fn overview_on_rising_income_is_improving() {
    let bundle = load_bundle("acme_overview");
    let out = registry()
        .get("overview")
        .unwrap()
        .calculate(&bundle, "Overview")
        .unwrap();

    assert_eq!(out.trend("revenue").unwrap().direction, TrendDirection::Improving);
    assert_eq!(out.trend("netIncome").unwrap().direction, TrendDirection::Improving);
    assert_eq!(out.facts["companyName"], "Acme Corporation");

    // 10.0B -> 15.2B over four years.
    let cagr = out.metric("revenueCagr").unwrap().value.unwrap();
    assert!((cagr - (1.52f64.powf(0.25) - 1.0)).abs() < 1e-9);
    assert!(out.metric("revenueCagr").unwrap().is_met);

    let growth = out.metric("revenueGrowth").unwrap().value.unwrap();
    assert!((growth - (15.2 / 13.6 - 1.0)).abs() < 1e-9);
}

#[test]
fn scorecard_on_full_bundle() {
    let bundle = load_bundle("acme_full");
    let out = registry()
        .get("scorecard")
        .unwrap()
        .calculate(&bundle, "Scorecard")
        .unwrap();

    // TTM values win over annual ones.
    assert_eq!(out.metric("debtToEquity").unwrap().value, Some(0.42));
    // FCF yield 3.4% misses the 4% bar; everything else passes.
    assert!(!out.metric("freeCashFlowYield").unwrap().is_met);
    let conviction = out.conviction.clone().unwrap();
    assert_eq!(conviction.criteria_met, 7);
    assert_eq!(conviction.criteria_total, 8);
    // 9.5 of 10.5 weight met.
    assert_eq!(conviction.score, 90);
    assert_eq!(conviction.band, ConvictionBand::High);
    assert_eq!(out.trend("returnOnEquity").unwrap().direction, TrendDirection::Improving);
}

#[test]
fn peer_comparison_on_full_bundle() {
    let bundle = load_bundle("acme_full");
    let out = registry()
        .get("peer_comparison")
        .unwrap()
        .calculate(&bundle, "PeerComparison")
        .unwrap();

    assert_eq!(out.facts["peerGroup"], "Specialty Machinery");
    // Pricier than peers on earnings is unfavorable.
    assert_eq!(out.facts["peRatioStanding"], "unfavorable");
    assert!(!out.metric("peRatioPremium").unwrap().is_met);
    // Better returns than peers is favorable.
    assert_eq!(out.facts["returnOnEquityStanding"], "favorable");
    let roe_premium = out.metric("returnOnEquityPremium").unwrap().value.unwrap();
    assert!((roe_premium - (0.214 / 0.15 - 1.0)).abs() < 1e-9);
}

#[test]
fn growth_outlook_on_full_bundle() {
    let bundle = load_bundle("acme_full");
    let out = registry()
        .get("growth_outlook")
        .unwrap()
        .calculate(&bundle, "GrowthOutlook")
        .unwrap();

    let fcf_cagr = out.metric("freeCashFlowCagr").unwrap().value.unwrap();
    assert!((fcf_cagr - (1650.0f64 / 800.0).powf(0.25) + 1.0).abs() < 1e-9);
    assert!(out.metric("fcfConversion").unwrap().is_met);
    assert_eq!(out.trend("freeCashFlow").unwrap().direction, TrendDirection::Improving);
}

#[test]
fn sparse_bundle_yields_sentinels_everywhere() {
    let bundle = load_bundle("sparse");
    let registry = registry();
    for (calculator, report_type) in [
        ("overview", "Overview"),
        ("scorecard", "Scorecard"),
        ("peer_comparison", "PeerComparison"),
        ("growth_outlook", "GrowthOutlook"),
    ] {
        let mut out = registry
            .get(calculator)
            .unwrap()
            .calculate(&bundle, report_type)
            .unwrap_or_else(|e| panic!("{calculator}: {e}"));
        for (name, metric) in &out.metrics {
            assert!(metric.value.is_none(), "{calculator}.{name} should be unavailable");
            assert!(!metric.is_met);
        }
        for trend in out.trends.values() {
            assert_eq!(trend.direction, TrendDirection::InsufficientData);
        }
        interpret_bundle(&mut out, &default_tables());
        for metric in out.metrics.values() {
            if let Some(interp) = &metric.interpretation {
                assert_eq!(interp.category, "Not available");
            }
        }
    }
}

#[test]
fn calculation_is_deterministic() {
    let bundle = load_bundle("acme_full");
    let calc = registry().get("scorecard").unwrap();
    let a = calc.calculate(&bundle, "Scorecard").unwrap();
    let b = calc.calculate(&bundle, "Scorecard").unwrap();
    assert_eq!(a, b);
}

#[test]
fn interpretation_attached_to_overview() {
    let bundle = load_bundle("acme_overview");
    let mut out = registry()
        .get("overview")
        .unwrap()
        .calculate(&bundle, "Overview")
        .unwrap();
    interpret_bundle(&mut out, &default_tables());
    let net = out.metric("netMargin").unwrap();
    // 1.824 / 15.2 = 12%.
    let interp = net.interpretation.as_ref().unwrap();
    assert_eq!(interp.category, "Strong");
    assert_eq!(interp.text, "Net margin of 12.0% is strong.");
}
