//! Raw-data endpoint names used by the built-in calculators.

pub const PROFILE: &str = "profile";
pub const INCOME_ANNUAL: &str = "incomeAnnual";
pub const CASH_FLOW_ANNUAL: &str = "cashFlowAnnual";
pub const RATIOS_TTM: &str = "ratiosTtm";
pub const RATIOS_ANNUAL: &str = "ratiosAnnual";
pub const KEY_METRICS_TTM: &str = "keyMetricsTtm";
pub const KEY_METRICS_ANNUAL: &str = "keyMetricsAnnual";
pub const PEER_BENCHMARK: &str = "peerBenchmark";
