//! Top-level Quill configuration with layered resolution.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    defaults, GenerationConfig, MetricsConfig, ObservabilityConfig, ReportTypeConfig,
    StorageConfig,
};
use crate::errors::ConfigError;

/// Name of the project config file looked up in the root directory.
pub const CONFIG_FILENAME: &str = "quill.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`QUILL_*`)
/// 2. Project config (`quill.toml` in the root directory)
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QuillConfig {
    pub generation: GenerationConfig,
    pub storage: StorageConfig,
    pub metrics: MetricsConfig,
    pub observability: ObservabilityConfig,
    /// Report-type overrides and additions, keyed by report-type name.
    pub report_types: BTreeMap<String, ReportTypeConfig>,
}

impl QuillConfig {
    /// Load configuration for a project rooted at `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILENAME);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load a specific TOML file, without env overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &QuillConfig) -> Result<(), ConfigError> {
        if config.generation.stage_deadline_ms == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "generation.stage_deadline_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.metrics.trend_lookback < defaults::MIN_TREND_POINTS {
            return Err(ConfigError::ValidationFailed {
                field: "metrics.trend_lookback".to_string(),
                message: format!("must be at least {}", defaults::MIN_TREND_POINTS),
            });
        }
        if config.metrics.ratio_trend_threshold_pct <= 0.0
            || config.metrics.absolute_trend_threshold_pct <= 0.0
        {
            return Err(ConfigError::ValidationFailed {
                field: "metrics.*_trend_threshold_pct".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.metrics.cagr_years == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "metrics.cagr_years".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.storage.db_path.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "storage.db_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        for (name, report_type) in &config.report_types {
            if let Some(stages) = &report_type.stages {
                if stages.is_empty() {
                    return Err(ConfigError::ValidationFailed {
                        field: format!("report_types.{name}.stages"),
                        message: "must contain at least one stage".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `QUILL_GENERATION_DEADLINE_MS`, `QUILL_STORAGE_DB_PATH`, etc.
    fn apply_env_overrides(config: &mut QuillConfig) {
        if let Ok(val) = std::env::var("QUILL_GENERATION_DEADLINE_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.generation.stage_deadline_ms = v;
            }
        }
        if let Ok(val) = std::env::var("QUILL_GENERATION_BASE_URL") {
            config.generation.base_url = Some(val);
        }
        if let Ok(val) = std::env::var("QUILL_GENERATION_MODEL") {
            config.generation.model = val;
        }
        if let Ok(val) = std::env::var("QUILL_GENERATION_SERIALIZE_PER_KEY") {
            if let Ok(v) = val.parse::<bool>() {
                config.generation.serialize_per_key = v;
            }
        }
        if let Ok(val) = std::env::var("QUILL_STORAGE_DB_PATH") {
            config.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("QUILL_METRICS_TREND_LOOKBACK") {
            if let Ok(v) = val.parse::<usize>() {
                config.metrics.trend_lookback = v;
            }
        }
        if let Ok(val) = std::env::var("QUILL_LOG_LEVEL") {
            config.observability.log_level = val;
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
