use quill_core::errors::DataError;
use quill_core::models::{Metric, MetricBundle, MetricFormat, RawDataBundle};
use quill_core::traits::IMetricCalculator;

use crate::endpoints::{PEER_BENCHMARK, PROFILE, RATIOS_TTM};
use crate::extract::SourceSet;
use crate::premium::{benchmark_premium, Standing};

pub const NAME: &str = "peer_comparison";

/// One compared metric: subject field in `ratiosTtm`, benchmark field in
/// `peerBenchmark`.
struct Comparable {
    key: &'static str,
    label: &'static str,
    subject_field: &'static str,
    benchmark_field: &'static str,
    higher_is_better: bool,
    format: MetricFormat,
}

const COMPARABLES: &[Comparable] = &[
    Comparable {
        key: "peRatio",
        label: "P/E ratio",
        subject_field: "peRatioTTM",
        benchmark_field: "peRatio",
        higher_is_better: false,
        format: MetricFormat::Decimal,
    },
    Comparable {
        key: "priceToBook",
        label: "Price to book",
        subject_field: "priceToBookRatioTTM",
        benchmark_field: "priceToBookRatio",
        higher_is_better: false,
        format: MetricFormat::Decimal,
    },
    Comparable {
        key: "returnOnEquity",
        label: "Return on equity",
        subject_field: "returnOnEquityTTM",
        benchmark_field: "returnOnEquity",
        higher_is_better: true,
        format: MetricFormat::Percent,
    },
    Comparable {
        key: "netMargin",
        label: "Net margin",
        subject_field: "netProfitMarginTTM",
        benchmark_field: "netProfitMargin",
        higher_is_better: true,
        format: MetricFormat::Percent,
    },
    Comparable {
        key: "debtToEquity",
        label: "Debt to equity",
        subject_field: "debtEquityRatioTTM",
        benchmark_field: "debtEquityRatio",
        higher_is_better: false,
        format: MetricFormat::Decimal,
    },
    Comparable {
        key: "dividendYield",
        label: "Dividend yield",
        subject_field: "dividendYieldTTM",
        benchmark_field: "dividendYield",
        higher_is_better: true,
        format: MetricFormat::Percent,
    },
];

/// Subject ratios against a peer-group benchmark.
///
/// For each comparable the bundle carries the subject's own value under
/// `<key>`, the relative premium under `<key>Premium` (met when favorable),
/// and a `<key>Standing` fact. Pairs on opposite sides of zero get a
/// `<key>Note` fact in place of a premium.
#[derive(Debug, Clone, Default)]
pub struct PeerComparisonCalculator;

impl IMetricCalculator for PeerComparisonCalculator {
    fn name(&self) -> &str {
        NAME
    }

    fn calculate(&self, bundle: &RawDataBundle, report_type: &str) -> Result<MetricBundle, DataError> {
        let sources = SourceSet::load(bundle, report_type, &[PROFILE, RATIOS_TTM, PEER_BENCHMARK], &[])?;
        let mut out = MetricBundle::new(&bundle.subject, report_type);

        out.insert_fact("companyName", sources.text(PROFILE, "companyName"));
        out.insert_fact("sector", sources.text(PROFILE, "sector"));
        out.insert_fact("peerGroup", sources.text(PEER_BENCHMARK, "peerGroup"));

        for c in COMPARABLES {
            let subject = sources.latest(RATIOS_TTM, c.subject_field);
            let benchmark = sources.latest(PEER_BENCHMARK, c.benchmark_field);
            let outcome = match (subject, benchmark) {
                (Some(s), Some(b)) => Some(benchmark_premium(s, b, c.higher_is_better)),
                _ => None,
            };
            let favorable = outcome.is_some_and(|o| o.standing == Standing::Favorable);

            out.insert_metric(c.key, Metric::evaluated(subject, c.format, |_| favorable));
            out.insert_metric(
                format!("{}Premium", c.key),
                Metric::evaluated(outcome.and_then(|o| o.premium), MetricFormat::Percent, |_| {
                    favorable
                }),
            );

            let Some(outcome) = outcome else {
                continue;
            };
            out.insert_fact(
                format!("{}Standing", c.key),
                Some(outcome.standing.as_str().to_string()),
            );
            if let (true, Some(s), Some(b)) = (outcome.crossed_zero, subject, benchmark) {
                out.insert_fact(
                    format!("{}Note", c.key),
                    Some(format!(
                        "{} of {} against a peer benchmark of {} crosses zero; no premium is computed.",
                        c.label,
                        c.format.render(s),
                        c.format.render(b),
                    )),
                );
            }
        }

        Ok(out)
    }
}
