//! # quill-metrics
//!
//! Pure calculators turning a raw data bundle into a `MetricBundle`:
//! compound growth, trend classification, pass/fail scorecards with a
//! weighted conviction score, and peer premiums. The interpretation mapper
//! buckets metric values into qualitative categories with explanatory text.

pub mod calculators;
pub mod endpoints;
pub mod extract;
pub mod growth;
pub mod interpretation;
pub mod premium;
pub mod registry;
pub mod scorecard;
pub mod trend;

pub use calculators::CalculatorSettings;
pub use growth::compound_growth_rate;
pub use interpretation::{default_tables, interpret, interpret_bundle};
pub use premium::{benchmark_premium, PremiumOutcome, Standing};
pub use registry::CalculatorRegistry;
pub use scorecard::conviction_score;
pub use trend::{classify_trend, TrendThresholds};
