use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info,sqlx=warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing subscriber with compact human-readable output on stdout.
/// - Respects `RUST_LOG` if set
/// - Falls back to [`DEFAULT_FILTER`]
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output on stdout.
pub fn init_logging_json() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

/// Pick the formatter by name; anything other than `json` is compact.
pub fn init_logging(format: &str) {
    if format.eq_ignore_ascii_case("json") {
        init_logging_json();
    } else {
        init_logging_default();
    }
}
