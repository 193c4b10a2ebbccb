use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::metric::MetricFormat;

/// Static configuration for one report type. Loaded once at startup and
/// immutable at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTypeSpec {
    pub name: String,
    pub required_endpoints: Vec<String>,
    pub prompt_template: String,
    pub pass_strategy: PassStrategy,
    /// Interpretation tables keyed by metric name.
    #[serde(default)]
    pub thresholds: BTreeMap<String, ThresholdTable>,
    /// Name of the metric calculator bound to this report type.
    pub calculator: String,
}

/// What a stage is expected to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageOutput {
    /// Free-form prose, passed through as-is.
    #[default]
    Text,
    /// A JSON document. Validated (with one repair attempt) before advancing.
    Json,
}

/// One pass of a multi-pass strategy.
///
/// `instruction` is a template; `{previous}` receives the prior stage's full
/// output (the compiled report prompt for the first stage), `{subject}` and
/// `{report_type}` identify the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDescriptor {
    pub name: String,
    pub instruction: String,
    /// Per-stage deadline. `0` (or omitted) takes the configured default.
    #[serde(default)]
    pub deadline_ms: u64,
    #[serde(default)]
    pub output: StageOutput,
}

impl StageDescriptor {
    pub fn new(name: impl Into<String>, instruction: impl Into<String>, deadline: Duration) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
            deadline_ms: millis(deadline),
            output: StageOutput::Text,
        }
    }

    pub fn with_output(mut self, output: StageOutput) -> Self {
        self.output = output;
        self
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}

/// Ordered list of stages interpreted by the generic pass runner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassStrategy {
    pub stages: Vec<StageDescriptor>,
}

impl PassStrategy {
    pub fn new(stages: Vec<StageDescriptor>) -> Self {
        Self { stages }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name.as_str()).collect()
    }

    /// Replace every stage deadline. Used to inject short deadlines in tests
    /// and to apply the configured default.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        for stage in &mut self.stages {
            stage.deadline_ms = millis(deadline);
        }
        self
    }

    /// Give `deadline` to every stage that left its own unset.
    pub fn with_default_deadline(mut self, deadline: Duration) -> Self {
        for stage in self.stages.iter_mut().filter(|s| s.deadline_ms == 0) {
            stage.deadline_ms = millis(deadline);
        }
        self
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// One bucket of a threshold table: `min` inclusive, `max` exclusive,
/// either bound optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    pub category: String,
    /// Template with `{label}`, `{value}` and `{category}` placeholders.
    pub text: String,
}

impl ThresholdBand {
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value < max)
    }
}

/// Deterministic value-to-category table for one metric. Bands are checked
/// in declaration order; the first match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub label: String,
    #[serde(default)]
    pub format: MetricFormat,
    pub bands: Vec<ThresholdBand>,
}

impl ThresholdTable {
    pub fn band_for(&self, value: f64) -> Option<&ThresholdBand> {
        self.bands.iter().find(|b| b.contains(value))
    }
}
