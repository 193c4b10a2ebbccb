use std::time::Duration;

/// Failure reported by a text-generation backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationFailure {
    #[error("service error ({status:?}): {message}")]
    Service { status: Option<u16>, message: String },

    #[error("deadline exceeded")]
    Timeout,
}

/// Hosted text-generation backend. One call, one prompt, one completion.
#[allow(async_fn_in_trait)]
pub trait ITextGenerator: Send + Sync {
    /// Backend name for logs.
    fn name(&self) -> &str;

    /// Generate a completion for `prompt`. `deadline` bounds the call; the
    /// pass runner enforces it independently as well.
    async fn generate(&self, prompt: &str, deadline: Duration) -> Result<String, GenerationFailure>;
}
