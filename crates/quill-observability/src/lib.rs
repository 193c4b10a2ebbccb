//! # quill-observability
//!
//! Structured logging for the report pipeline: subscriber setup, span
//! macros per operation, and typed event helpers.

pub mod tracing_setup;

pub use tracing_setup::events;
pub use tracing_setup::{init_from_config, init_tracing, init_tracing_json, init_tracing_with_filter};
