//! Calculator registry: name to calculator.

use std::collections::HashMap;
use std::sync::Arc;

use quill_core::config::MetricsConfig;
use quill_core::errors::ConfigError;
use quill_core::traits::IMetricCalculator;

use crate::calculators::{
    growth_outlook, overview, peer, scorecard, CalculatorSettings, GrowthOutlookCalculator,
    OverviewCalculator, PeerComparisonCalculator, ScorecardCalculator,
};

/// Maps calculator names (as bound by report types) to implementations.
#[derive(Clone, Default)]
pub struct CalculatorRegistry {
    calculators: HashMap<String, Arc<dyn IMetricCalculator>>,
}

impl CalculatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in calculator, tuned by `config`.
    pub fn builtin(config: &MetricsConfig) -> Self {
        let settings = CalculatorSettings::from_config(config);
        let mut registry = Self::new();
        registry.register(Arc::new(OverviewCalculator::new(settings)));
        registry.register(Arc::new(ScorecardCalculator::new(settings)));
        registry.register(Arc::new(PeerComparisonCalculator));
        registry.register(Arc::new(GrowthOutlookCalculator::new(settings)));
        registry
    }

    /// Register a calculator under its own name, replacing any previous one.
    pub fn register(&mut self, calculator: Arc<dyn IMetricCalculator>) {
        self.calculators
            .insert(calculator.name().to_string(), calculator);
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn IMetricCalculator>, ConfigError> {
        self.calculators
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownCalculator {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.calculators.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.calculators.keys().cloned().collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for CalculatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorRegistry")
            .field("calculators", &self.names())
            .finish()
    }
}

/// Names of the built-in calculators.
pub const BUILTIN: &[&str] = &[
    overview::NAME,
    scorecard::NAME,
    peer::NAME,
    growth_outlook::NAME,
];
