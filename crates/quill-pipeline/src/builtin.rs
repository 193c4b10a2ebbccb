//! Built-in report types.

use std::time::Duration;

use quill_core::models::ReportTypeSpec;
use quill_generation::stages::{four_pass, structured_two_pass, two_pass};
use quill_metrics::calculators::{growth_outlook, overview, peer, scorecard};
use quill_metrics::default_tables;
use quill_metrics::endpoints::{
    CASH_FLOW_ANNUAL, INCOME_ANNUAL, KEY_METRICS_ANNUAL, PEER_BENCHMARK, PROFILE, RATIOS_ANNUAL,
    RATIOS_TTM,
};

pub const OVERVIEW: &str = "Overview";
pub const SCORECARD: &str = "Scorecard";
pub const PEER_COMPARISON: &str = "PeerComparison";
pub const GROWTH_OUTLOOK: &str = "GrowthOutlook";

pub const OVERVIEW_TEMPLATE: &str = "\
Write a company overview of {facts.companyName} ({subject}), a {facts.industry} business in the \
{facts.sector} sector, as of {generated_on}.
Cover what the company does, how its revenue and profits have moved, and how profitable it is.
Use only the figures below. Metrics with a null value are not available; say so rather than estimate.

METRICS:
{metrics}";

pub const SCORECARD_TEMPLATE: &str = "\
Write a quality scorecard review of {facts.companyName} ({subject}) as of {generated_on}.
Overall conviction: {conviction}.
Walk through each criterion, state whether it was met and what the figure says about the business, \
then close with what would change the conviction score.
Use only the figures below. Metrics with a null value are not available; say so rather than estimate.

SCORECARD:
{metrics}";

pub const PEER_COMPARISON_TEMPLATE: &str = "\
Compare {facts.companyName} ({subject}) with its peer group ({facts.peerGroup}) as of {generated_on}.
For each metric, explain the premium or discount to the peer benchmark and whether it is favorable.
Where a premium is not meaningful because one side is negative, explain the sign difference instead.

COMPARISON:
{metrics}";

pub const GROWTH_OUTLOOK_TEMPLATE: &str = "\
Assess the growth outlook for {subject} as of {generated_on} using {facts.cagrYears}-year compound \
growth rates and recent trends in revenue, earnings and free cash flow.
Identify the main growth drivers, the main risks to continued growth, and the overall outlook.

GROWTH METRICS:
{metrics}";

fn endpoints(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Every built-in report type, with `deadline` applied to each stage.
pub fn builtin_specs(deadline: Duration) -> Vec<ReportTypeSpec> {
    vec![
        ReportTypeSpec {
            name: OVERVIEW.into(),
            required_endpoints: endpoints(&[PROFILE, INCOME_ANNUAL]),
            prompt_template: OVERVIEW_TEMPLATE.into(),
            pass_strategy: two_pass(deadline),
            thresholds: default_tables(),
            calculator: overview::NAME.into(),
        },
        ReportTypeSpec {
            name: SCORECARD.into(),
            required_endpoints: endpoints(&[
                RATIOS_TTM,
                RATIOS_ANNUAL,
                KEY_METRICS_ANNUAL,
                INCOME_ANNUAL,
            ]),
            prompt_template: SCORECARD_TEMPLATE.into(),
            pass_strategy: four_pass(deadline),
            thresholds: default_tables(),
            calculator: scorecard::NAME.into(),
        },
        ReportTypeSpec {
            name: PEER_COMPARISON.into(),
            required_endpoints: endpoints(&[PROFILE, RATIOS_TTM, PEER_BENCHMARK]),
            prompt_template: PEER_COMPARISON_TEMPLATE.into(),
            pass_strategy: four_pass(deadline),
            thresholds: default_tables(),
            calculator: peer::NAME.into(),
        },
        ReportTypeSpec {
            name: GROWTH_OUTLOOK.into(),
            required_endpoints: endpoints(&[INCOME_ANNUAL, CASH_FLOW_ANNUAL]),
            prompt_template: GROWTH_OUTLOOK_TEMPLATE.into(),
            pass_strategy: structured_two_pass(deadline),
            thresholds: default_tables(),
            calculator: growth_outlook::NAME.into(),
        },
    ]
}
