use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quill_core::config::MetricsConfig;
use quill_core::models::TrendKind;
use quill_metrics::{classify_trend, default_tables, interpret_bundle, CalculatorRegistry, TrendThresholds};

fn bench_calculators(c: &mut Criterion) {
    let bundle = test_fixtures::load_bundle("acme_full");
    let registry = CalculatorRegistry::builtin(&MetricsConfig::default());
    let tables = default_tables();

    for (name, report_type) in [
        ("overview", "Overview"),
        ("scorecard", "Scorecard"),
        ("peer_comparison", "PeerComparison"),
        ("growth_outlook", "GrowthOutlook"),
    ] {
        let calculator = registry.get(name).unwrap();
        c.bench_function(&format!("calculate_{name}"), |b| {
            b.iter(|| {
                let mut out = calculator.calculate(black_box(&bundle), report_type).unwrap();
                interpret_bundle(&mut out, &tables);
                out
            })
        });
    }
}

fn bench_trend(c: &mut Criterion) {
    let series: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64).sin() * 10.0 + i as f64).collect();
    let thresholds = TrendThresholds::default();
    c.bench_function("classify_trend_40_points", |b| {
        b.iter(|| classify_trend(black_box(&series), 5, TrendKind::Absolute, &thresholds))
    });
}

criterion_group!(benches, bench_calculators, bench_trend);
criterion_main!(benches);
