//! Tracing setup: subscriber initialization, span definitions and event helpers.

pub mod events;
pub mod spans;

use std::sync::Once;

use quill_core::config::ObservabilityConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable read for per-target filtering.
pub const LOG_ENV: &str = "QUILL_LOG";

const DEFAULT_FILTER: &str = "quill=info";

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize human-readable logging.
///
/// Reads `QUILL_LOG` for per-target levels, e.g.
/// `QUILL_LOG=quill_generation=debug,quill_storage=warn`.
/// Falls back to `quill=info` when unset or invalid.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(env_filter(DEFAULT_FILTER))
            .try_init();
    });
}

/// Initialize JSON-lines logging. Idempotent, shares the guard with
/// `init_tracing`.
pub fn init_tracing_json() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter(DEFAULT_FILTER))
            .with_target(true)
            .with_thread_ids(true)
            .json()
            .try_init();
    });
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_target(true)
            .try_init();
    });
}

/// Initialize from the `[observability]` config section. `QUILL_LOG` still
/// wins when set.
pub fn init_from_config(config: &ObservabilityConfig) {
    let fallback = format!("quill={}", config.log_level);
    INIT.call_once(|| {
        let filter = env_filter(&fallback);
        let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
        let _ = if config.json_logs {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
    });
}
