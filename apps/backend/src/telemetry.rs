use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default directives when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,actix_web=info,sqlx=warn,sea_orm=warn";

/// Install the process-wide JSON subscriber. Call once from `main`.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_ansi(false)
        .json()
        .with_current_span(true)
        .with_span_list(false);

    // A second call (e.g. from a test harness) keeps the first subscriber.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .ok();
}
