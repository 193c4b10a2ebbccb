//! # quill-pipeline
//!
//! Wires the collaborators into one request flow:
//! raw data cache -> dependency gate -> calculator -> interpretation ->
//! prompt -> multi-pass generation -> report store.
//!
//! `ReportEngine` is the explicit context object. Build it once from a
//! `QuillConfig` and share it by reference.

pub mod builtin;
pub mod engine;
pub mod registry;
pub mod resolver;

pub use engine::{EngineSettings, GeneratedReport, ReportEngine};
pub use registry::ReportTypeRegistry;
pub use resolver::{resolve, Resolution};
