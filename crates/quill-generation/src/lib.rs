//! # quill-generation
//!
//! Turns a metric bundle into report text: compiles the report prompt,
//! then drives the configured pass strategy stage by stage through a
//! text-generation backend. Stages run strictly in sequence, each under its
//! own deadline and the caller's cancellation token.

#[cfg(feature = "http")]
pub mod http;
pub mod prompt;
pub mod repair;
pub mod runner;
pub mod stages;

#[cfg(feature = "http")]
pub use http::HttpTextGenerator;
pub use prompt::compile_report_prompt;
pub use runner::{PassOutcome, PassRequest, PassRunner, StageProgress, StageRecord};
