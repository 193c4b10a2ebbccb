//! Span definitions per operation: resolve, calculate, generate, stage, store.

/// Create a dependency-resolution span.
#[macro_export]
macro_rules! resolve_span {
    ($subject:expr, $report_type:expr) => {
        tracing::info_span!("quill.resolve", subject = %$subject, report_type = %$report_type)
    };
}

/// Create a metric calculation span.
#[macro_export]
macro_rules! calculate_span {
    ($subject:expr, $calculator:expr) => {
        tracing::info_span!("quill.calculate", subject = %$subject, calculator = %$calculator)
    };
}

/// Create a span covering a whole multi-pass generation request.
#[macro_export]
macro_rules! generate_span {
    ($subject:expr, $report_type:expr, $stages:expr) => {
        tracing::info_span!(
            "quill.generate",
            subject = %$subject,
            report_type = %$report_type,
            stages = $stages
        )
    };
}

/// Create a span for one generation stage.
#[macro_export]
macro_rules! stage_span {
    ($stage:expr, $index:expr, $total:expr) => {
        tracing::info_span!("quill.stage", stage = %$stage, index = $index, total = $total)
    };
}

/// Create a report store span.
#[macro_export]
macro_rules! store_span {
    ($operation:expr, $key:expr) => {
        tracing::debug_span!("quill.store", operation = %$operation, key = %$key)
    };
}
