//! HTTP text generator for OpenAI-compatible chat completion endpoints.

use std::time::Duration;

use quill_core::config::GenerationConfig;
use quill_core::errors::ConfigError;
use quill_core::traits::{GenerationFailure, ITextGenerator};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Async reqwest client posting one user message per call to
/// `{base_url}/chat/completions`. No retries: a failed stage aborts the
/// request.
#[derive(Debug, Clone)]
pub struct HttpTextGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    max_output_tokens: u32,
}

impl HttpTextGenerator {
    pub fn new(base_url: &str, model: impl Into<String>, api_key: Option<String>) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .gzip(true)
            .build()
            .map_err(|e| ConfigError::ValidationFailed {
                field: "generation.base_url".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
            api_key,
            max_output_tokens: quill_core::config::defaults::DEFAULT_MAX_OUTPUT_TOKENS,
        })
    }

    /// Build from `[generation]`, reading the API key from the configured
    /// environment variable.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, ConfigError> {
        let base_url = config
            .base_url
            .as_deref()
            .ok_or_else(|| ConfigError::ValidationFailed {
                field: "generation.base_url".to_string(),
                message: "required for the HTTP generator".to_string(),
            })?;
        let api_key = std::env::var(&config.api_key_env).ok();
        let mut generator = Self::new(base_url, config.model.clone(), api_key)?;
        generator.max_output_tokens = config.max_output_tokens;
        Ok(generator)
    }
}

impl ITextGenerator for HttpTextGenerator {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate(&self, prompt: &str, deadline: Duration) -> Result<String, GenerationFailure> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_output_tokens,
        };
        let mut req = self.client.post(&self.endpoint).timeout(deadline).json(&body);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await.map_err(map_transport_err)?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "generation backend returned an error");
            return Err(GenerationFailure::Service {
                status: Some(status.as_u16()),
                message: if message.is_empty() {
                    status.to_string()
                } else {
                    message
                },
            });
        }

        let parsed: ChatResponse = resp.json().await.map_err(map_transport_err)?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GenerationFailure::Service {
                status: Some(status.as_u16()),
                message: "response contained no completion".to_string(),
            })
    }
}

fn map_transport_err(e: reqwest::Error) -> GenerationFailure {
    if e.is_timeout() {
        GenerationFailure::Timeout
    } else {
        GenerationFailure::Service {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}
