//! Scripted text generator.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use quill_core::traits::{GenerationFailure, ITextGenerator};

/// What the generator does on one call.
#[derive(Debug, Clone)]
pub enum Step {
    /// Return this text.
    Reply(String),
    /// Return this text after sleeping.
    Delayed(Duration, String),
    /// Fail with a service error.
    Fail { status: Option<u16>, message: String },
    /// Never answer within any realistic deadline.
    Hang,
    /// Return `"<call n>: "` followed by the prompt.
    Echo,
}

impl Step {
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Reply(text.into())
    }

    pub fn fail(status: u16, message: impl Into<String>) -> Self {
        Self::Fail {
            status: Some(status),
            message: message.into(),
        }
    }
}

/// Plays back a fixed script of steps, then repeats `fallback`. Records
/// every prompt it receives.
#[derive(Debug)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Step>>,
    fallback: Step,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(script: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback: Step::Echo,
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Echo every prompt.
    pub fn echo() -> Self {
        Self::new([])
    }

    /// Reply with `text` to every call.
    pub fn always(text: impl Into<String>) -> Self {
        Self::new([]).with_fallback(Step::Reply(text.into()))
    }

    pub fn with_fallback(mut self, fallback: Step) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn next_step(&self) -> Step {
        self.script
            .lock()
            .ok()
            .and_then(|mut s| s.pop_front())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl ITextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str, _deadline: Duration) -> Result<String, GenerationFailure> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        match self.next_step() {
            Step::Reply(text) => Ok(text),
            Step::Delayed(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
            Step::Fail { status, message } => Err(GenerationFailure::Service { status, message }),
            Step::Hang => {
                tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
                Err(GenerationFailure::Timeout)
            }
            Step::Echo => Ok(format!("<call {n}>: {prompt}")),
        }
    }
}
