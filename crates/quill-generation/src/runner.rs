//! Generic multi-pass runner.
//!
//! Interprets a `PassStrategy` against a text generator. Each stage wraps
//! the previous stage's full output in its instruction, calls the generator
//! under the stage deadline, and replaces the current text. The first
//! failure aborts the run; nothing intermediate escapes the runner.

use std::time::Instant;

use quill_core::errors::{GenerationError, QuillErrorCode};
use quill_core::models::{PassStrategy, StageDescriptor, StageOutput};
use quill_core::traits::{GenerationFailure, ITextGenerator};
use quill_observability::events;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::repair::parse_structured;
use crate::stages::stage_prompt;

/// Reported to the caller's progress callback before each stage starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageProgress<'a> {
    pub stage: &'a str,
    /// Zero-based position in the strategy.
    pub index: usize,
    pub total: usize,
}

/// One completed stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRecord {
    pub name: String,
    pub elapsed_ms: u64,
    pub output_chars: usize,
    /// Structured output needed the repair step.
    #[serde(default)]
    pub repaired: bool,
}

/// Terminal stage output plus per-stage records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutcome {
    pub content: String,
    pub stages: Vec<StageRecord>,
}

impl PassOutcome {
    pub fn stage_names(&self) -> Vec<String> {
        self.stages.iter().map(|s| s.name.clone()).collect()
    }
}

/// One request to the runner.
#[derive(Debug, Clone, Copy)]
pub struct PassRequest<'a> {
    pub subject: &'a str,
    pub report_type: &'a str,
    /// Compiled report prompt; the first stage's `{previous}`.
    pub prompt: &'a str,
    pub strategy: &'a PassStrategy,
}

pub struct PassRunner<'g, G> {
    generator: &'g G,
}

impl<'g, G: ITextGenerator> PassRunner<'g, G> {
    pub fn new(generator: &'g G) -> Self {
        Self { generator }
    }

    /// Run every stage in order.
    ///
    /// `progress` is called with the stage about to start. Cancelling
    /// `cancel` aborts the in-flight call and returns `Cancelled`.
    pub async fn run(
        &self,
        request: PassRequest<'_>,
        progress: &(dyn Fn(StageProgress<'_>) + Send + Sync),
        cancel: &CancellationToken,
    ) -> Result<PassOutcome, GenerationError> {
        let strategy = request.strategy;
        if strategy.is_empty() {
            return Err(GenerationError::EmptyStrategy {
                report_type: request.report_type.to_string(),
            });
        }

        let total = strategy.len();
        let mut current = request.prompt.to_string();
        let mut records = Vec::with_capacity(total);

        for (index, stage) in strategy.stages.iter().enumerate() {
            if cancel.is_cancelled() {
                let err = GenerationError::Cancelled {
                    stage: stage.name.clone(),
                };
                events::stage_failed(&stage.name, index, err.error_code(), &err.to_string());
                return Err(err);
            }
            progress(StageProgress {
                stage: &stage.name,
                index,
                total,
            });

            let span = quill_observability::stage_span!(stage.name, index, total);
            let started = Instant::now();
            let result = self
                .run_stage(stage, &current, request, cancel)
                .instrument(span)
                .await;
            match result {
                Ok((output, repaired)) => {
                    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let output_chars = output.chars().count();
                    events::stage_completed(&stage.name, index, total, elapsed_ms, output_chars);
                    records.push(StageRecord {
                        name: stage.name.clone(),
                        elapsed_ms,
                        output_chars,
                        repaired,
                    });
                    current = output;
                }
                Err(err) => {
                    events::stage_failed(&stage.name, index, err.error_code(), &err.to_string());
                    return Err(err);
                }
            }
        }

        Ok(PassOutcome {
            content: current,
            stages: records,
        })
    }

    async fn run_stage(
        &self,
        stage: &StageDescriptor,
        previous: &str,
        request: PassRequest<'_>,
        cancel: &CancellationToken,
    ) -> Result<(String, bool), GenerationError> {
        let prompt = stage_prompt(stage, previous, request.subject, request.report_type);
        let deadline = stage.deadline();
        let call = tokio::time::timeout(deadline, self.generator.generate(&prompt, deadline));

        let text = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(GenerationError::Cancelled { stage: stage.name.clone() });
            }
            outcome = call => match outcome {
                Err(_) | Ok(Err(GenerationFailure::Timeout)) => {
                    return Err(GenerationError::Timeout {
                        stage: stage.name.clone(),
                        deadline_ms: stage.deadline_ms,
                    });
                }
                Ok(Err(GenerationFailure::Service { status, message })) => {
                    return Err(GenerationError::Service {
                        stage: stage.name.clone(),
                        status,
                        message,
                    });
                }
                Ok(Ok(text)) => text,
            },
        };

        if text.trim().is_empty() {
            return Err(GenerationError::MalformedOutput {
                stage: stage.name.clone(),
                reason: "empty output".to_string(),
            });
        }

        match stage.output {
            StageOutput::Text => Ok((text, false)),
            StageOutput::Json => {
                let structured =
                    parse_structured(&text).map_err(|reason| GenerationError::MalformedOutput {
                        stage: stage.name.clone(),
                        reason,
                    })?;
                if structured.repaired {
                    events::output_repaired(&stage.name);
                }
                let normalized = serde_json::to_string_pretty(&structured.value).map_err(|e| {
                    GenerationError::MalformedOutput {
                        stage: stage.name.clone(),
                        reason: e.to_string(),
                    }
                })?;
                Ok((normalized, structured.repaired))
            }
        }
    }
}
