use serde::{Deserialize, Serialize};

use super::defaults;

/// Multi-pass generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Deadline applied to built-in stages and to configured stages that
    /// omit `deadline_ms` (ms).
    pub stage_deadline_ms: u64,
    /// Serialize concurrent generation requests for the same
    /// (subject, report type). History is retained either way.
    pub serialize_per_key: bool,
    /// Base URL of the HTTP generation backend (`http` feature).
    pub base_url: Option<String>,
    /// Model identifier sent to the backend.
    pub model: String,
    /// Name of the environment variable holding the backend API key.
    pub api_key_env: String,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            stage_deadline_ms: defaults::DEFAULT_STAGE_DEADLINE_MS,
            serialize_per_key: defaults::DEFAULT_SERIALIZE_PER_KEY,
            base_url: None,
            model: defaults::DEFAULT_GENERATION_MODEL.to_string(),
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            max_output_tokens: defaults::DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}
