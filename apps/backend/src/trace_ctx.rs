//! Task-local trace id for the request being served.
//!
//! `RequestTrace` establishes the scope; error rendering and log statements
//! read it back through [`trace_id`].

use std::future::Future;

use tokio::task_local;

/// Value reported when no request scope is active.
pub const UNKNOWN_TRACE_ID: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current task, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| UNKNOWN_TRACE_ID.to_string())
}

/// Run `future` with `trace_id` visible to everything it awaits.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
