//! Report-type registry: report-type name to its static configuration.
//!
//! Built from the built-in types, then `[report_types.<name>]` tables from
//! config are layered on top. Every entry's calculator is checked against
//! the calculator registry at load time, so a bad binding fails at startup
//! instead of mid-request.

use std::collections::BTreeMap;
use std::time::Duration;

use quill_core::config::{QuillConfig, ReportTypeConfig};
use quill_core::errors::ConfigError;
use quill_core::models::{PassStrategy, ReportTypeSpec};
use quill_metrics::CalculatorRegistry;

use crate::builtin::builtin_specs;

#[derive(Debug, Clone, Default)]
pub struct ReportTypeRegistry {
    specs: BTreeMap<String, ReportTypeSpec>,
}

impl ReportTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in report types only, each stage bounded by `deadline`.
    pub fn builtin(deadline: Duration) -> Self {
        let mut registry = Self::new();
        for spec in builtin_specs(deadline) {
            registry.specs.insert(spec.name.clone(), spec);
        }
        registry
    }

    /// Built-in types with config overrides applied, validated against
    /// `calculators`.
    pub fn from_config(
        config: &QuillConfig,
        calculators: &CalculatorRegistry,
    ) -> Result<Self, ConfigError> {
        let deadline = Duration::from_millis(config.generation.stage_deadline_ms);
        let mut registry = Self::builtin(deadline);
        for (name, overrides) in &config.report_types {
            let mut spec = match registry.specs.remove(name) {
                Some(base) => apply_overrides(base, overrides),
                None => new_spec(name, overrides)?,
            };
            spec.pass_strategy = spec.pass_strategy.with_default_deadline(deadline);
            registry.specs.insert(name.clone(), spec);
        }
        registry.validate(calculators)?;
        Ok(registry)
    }

    /// Add or replace a report type.
    pub fn register(&mut self, spec: ReportTypeSpec) {
        self.specs.insert(spec.name.clone(), spec);
    }

    pub fn get(&self, name: &str) -> Result<&ReportTypeSpec, ConfigError> {
        self.specs
            .get(name)
            .ok_or_else(|| ConfigError::UnknownReportType {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.specs.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Every report type binds a known calculator and has at least one stage.
    pub fn validate(&self, calculators: &CalculatorRegistry) -> Result<(), ConfigError> {
        for spec in self.specs.values() {
            if !calculators.contains(&spec.calculator) {
                return Err(ConfigError::UnknownCalculator {
                    name: spec.calculator.clone(),
                });
            }
            if spec.pass_strategy.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: format!("report_types.{}.stages", spec.name),
                    message: "must contain at least one stage".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn apply_overrides(mut spec: ReportTypeSpec, overrides: &ReportTypeConfig) -> ReportTypeSpec {
    if let Some(required) = &overrides.required_endpoints {
        spec.required_endpoints = required.clone();
    }
    if let Some(template) = &overrides.prompt_template {
        spec.prompt_template = template.clone();
    }
    if let Some(calculator) = &overrides.calculator {
        spec.calculator = calculator.clone();
    }
    if let Some(stages) = &overrides.stages {
        spec.pass_strategy = PassStrategy::new(stages.clone());
    }
    for (metric, table) in &overrides.thresholds {
        spec.thresholds.insert(metric.clone(), table.clone());
    }
    spec
}

fn new_spec(name: &str, config: &ReportTypeConfig) -> Result<ReportTypeSpec, ConfigError> {
    let missing = |field: &str| ConfigError::ValidationFailed {
        field: format!("report_types.{name}.{field}"),
        message: "required for a report type that is not built in".to_string(),
    };
    Ok(ReportTypeSpec {
        name: name.to_string(),
        required_endpoints: config
            .required_endpoints
            .clone()
            .ok_or_else(|| missing("required_endpoints"))?,
        prompt_template: config
            .prompt_template
            .clone()
            .ok_or_else(|| missing("prompt_template"))?,
        pass_strategy: config
            .stages
            .clone()
            .map(PassStrategy::new)
            .ok_or_else(|| missing("stages"))?,
        thresholds: config.thresholds.clone(),
        calculator: config.calculator.clone().ok_or_else(|| missing("calculator"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{GROWTH_OUTLOOK, OVERVIEW, PEER_COMPARISON, SCORECARD};
    use quill_core::config::MetricsConfig;

    fn calculators() -> CalculatorRegistry {
        CalculatorRegistry::builtin(&MetricsConfig::default())
    }

    #[test]
    fn default_config_loads_builtins() {
        let registry = ReportTypeRegistry::from_config(&QuillConfig::default(), &calculators()).unwrap();
        let mut expected = vec![OVERVIEW, SCORECARD, PEER_COMPARISON, GROWTH_OUTLOOK];
        expected.sort_unstable();
        assert_eq!(registry.names(), expected);
        let overview = registry.get(OVERVIEW).unwrap();
        assert!(overview
            .pass_strategy
            .stages
            .iter()
            .all(|s| s.deadline_ms == quill_core::config::defaults::DEFAULT_STAGE_DEADLINE_MS));
    }

    #[test]
    fn unknown_report_type() {
        let registry = ReportTypeRegistry::builtin(Duration::from_secs(1));
        assert_eq!(
            registry.get("Horoscope").unwrap_err(),
            ConfigError::UnknownReportType {
                name: "Horoscope".into()
            }
        );
    }

    #[test]
    fn toml_overrides_builtin_fields() {
        let config = QuillConfig::from_toml(
            r#"
            [report_types.Overview]
            prompt_template = "Short take on {subject}: {metrics}"

            [[report_types.Overview.stages]]
            name = "draft"
            instruction = "{previous}"
            deadline_ms = 500
            "#,
        )
        .unwrap();
        let registry = ReportTypeRegistry::from_config(&config, &calculators()).unwrap();
        let overview = registry.get(OVERVIEW).unwrap();
        assert_eq!(overview.prompt_template, "Short take on {subject}: {metrics}");
        assert_eq!(overview.pass_strategy.stage_names(), vec!["draft"]);
        assert_eq!(overview.required_endpoints, vec!["profile", "incomeAnnual"]);
        assert_eq!(overview.calculator, "overview");
    }

    #[test]
    fn toml_adds_new_report_type() {
        let config = QuillConfig::from_toml(
            r#"
            [report_types.QuickGrowth]
            required_endpoints = ["incomeAnnual", "cashFlowAnnual"]
            prompt_template = "{metrics}"
            calculator = "growth_outlook"

            [[report_types.QuickGrowth.stages]]
            name = "draft"
            instruction = "{previous}"
            deadline_ms = 1000
            "#,
        )
        .unwrap();
        let registry = ReportTypeRegistry::from_config(&config, &calculators()).unwrap();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get("QuickGrowth").unwrap().calculator, "growth_outlook");
    }

    #[test]
    fn stage_without_deadline_takes_configured_default() {
        let config = QuillConfig::from_toml(
            r#"
            [generation]
            stage_deadline_ms = 7500

            [report_types.QuickGrowth]
            required_endpoints = ["incomeAnnual"]
            prompt_template = "{metrics}"
            calculator = "growth_outlook"

            [[report_types.QuickGrowth.stages]]
            name = "draft"
            instruction = "{previous}"

            [[report_types.QuickGrowth.stages]]
            name = "refine"
            instruction = "{previous}"
            deadline_ms = 900
            "#,
        )
        .unwrap();
        let registry = ReportTypeRegistry::from_config(&config, &calculators()).unwrap();
        let stages = &registry.get("QuickGrowth").unwrap().pass_strategy.stages;
        assert_eq!(stages[0].deadline_ms, 7_500);
        assert_eq!(stages[1].deadline_ms, 900);
    }

    #[test]
    fn new_report_type_must_be_complete() {
        let config = QuillConfig::from_toml(
            r#"
            [report_types.Partial]
            prompt_template = "{metrics}"
            "#,
        )
        .unwrap();
        let err = ReportTypeRegistry::from_config(&config, &calculators()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "report_types.Partial.required_endpoints"));
    }

    #[test]
    fn unknown_calculator_rejected_at_load() {
        let config = QuillConfig::from_toml(
            r#"
            [report_types.Overview]
            calculator = "tea_leaves"
            "#,
        )
        .unwrap();
        assert_eq!(
            ReportTypeRegistry::from_config(&config, &calculators()).unwrap_err(),
            ConfigError::UnknownCalculator {
                name: "tea_leaves".into()
            }
        );
    }
}
