//! Structured log events for key pipeline operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log missing dependencies that blocked a request.
pub fn dependencies_missing(subject: &str, report_type: &str, missing: &[String]) {
    tracing::warn!(
        event = "dependencies_missing",
        subject = %subject,
        report_type = %report_type,
        missing = ?missing,
        "required endpoints missing; refresh and retry"
    );
}

/// Log endpoints whose cached payload is older than the staleness window.
pub fn stale_data(subject: &str, endpoints: &[String], stale_after_hours: u64) {
    tracing::warn!(
        event = "stale_data",
        subject = %subject,
        endpoints = ?endpoints,
        stale_after_hours = stale_after_hours,
        "generating from stale raw data"
    );
}

/// Log metric calculation results.
pub fn metrics_calculated(subject: &str, report_type: &str, metrics: usize, available: usize) {
    tracing::debug!(
        event = "metrics_calculated",
        subject = %subject,
        report_type = %report_type,
        metrics = metrics,
        available = available,
        "metrics calculated"
    );
}

/// Log a completed generation stage.
pub fn stage_completed(stage: &str, index: usize, total: usize, elapsed_ms: u64, output_chars: usize) {
    tracing::info!(
        event = "stage_completed",
        stage = %stage,
        index = index,
        total = total,
        elapsed_ms = elapsed_ms,
        output_chars = output_chars,
        "generation stage completed"
    );
}

/// Log a failed generation stage.
pub fn stage_failed(stage: &str, index: usize, code: &str, reason: &str) {
    tracing::warn!(
        event = "stage_failed",
        stage = %stage,
        index = index,
        code = %code,
        reason = %reason,
        "generation stage failed; aborting request"
    );
}

/// Log a structured-output repair.
pub fn output_repaired(stage: &str) {
    tracing::info!(
        event = "output_repaired",
        stage = %stage,
        "stage output repaired before parsing"
    );
}

/// Log a persisted report with the stages that produced it and their
/// combined generation time.
pub fn report_generated(
    subject: &str,
    report_type: &str,
    report_id: &str,
    version: u64,
    stages: &[String],
    elapsed_ms: u64,
) {
    tracing::info!(
        event = "report_generated",
        subject = %subject,
        report_type = %report_type,
        report_id = %report_id,
        version = version,
        stages = ?stages,
        elapsed_ms = elapsed_ms,
        "report generated"
    );
}

/// Log a report deletion.
pub fn report_deleted(report_id: &str) {
    tracing::info!(event = "report_deleted", report_id = %report_id, "report deleted");
}
