//! Tests for the Quill tracing setup.

use std::sync::Mutex;

use quill_observability::{events, init_tracing};

/// Serializes tests that touch the QUILL_LOG variable.
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn quill_log_debug_is_accepted() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("QUILL_LOG", "debug");
    init_tracing();
    std::env::remove_var("QUILL_LOG");
}

#[test]
fn per_crate_filter_is_accepted() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("QUILL_LOG", "quill_generation=debug,quill_storage=warn");
    init_tracing();
    std::env::remove_var("QUILL_LOG");
}

#[test]
fn init_tracing_is_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    quill_observability::init_tracing_json();
}

#[test]
fn garbage_filter_falls_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("QUILL_LOG", "this_is_garbage_not_a_valid_filter=???");
    init_tracing();
    std::env::remove_var("QUILL_LOG");
}

#[test]
fn events_and_spans_emit_without_panicking() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    let span = quill_observability::generate_span!("ACME", "Overview", 2);
    let _guard = span.enter();
    events::stage_completed("Draft", 0, 2, 12, 340);
    events::stage_failed("Refine", 1, "GENERATION_TIMEOUT", "deadline exceeded");
    events::report_generated("ACME", "Overview", "id-1", 1, &["Draft".into(), "Refine".into()], 1_250);
}
