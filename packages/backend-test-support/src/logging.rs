//! Quiet tracing subscriber shared by unit and integration tests.
//!
//! Level comes from `TEST_LOG`, then `RUST_LOG`, else `warn`.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

fn filter_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("TEST_LOG")
        .or_else(|| lookup("RUST_LOG"))
        .unwrap_or_else(|| "warn".to_string())
}

/// Install the subscriber once; later calls are no-ops.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let directives = filter_from(|key| std::env::var(key).ok());

        // try_init: another crate's subscriber may already be set
        fmt()
            .with_env_filter(EnvFilter::new(directives))
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
