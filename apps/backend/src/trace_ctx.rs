//! Task-local trace id for the request being handled.
//!
//! `RequestTrace` scopes every request future with its id so error bodies
//! and log lines deep in services can carry it without threading it through
//! call signatures.

use std::cell::RefCell;

use tokio::task_local;

const UNKNOWN: &str = "unknown";

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// Trace id of the current request, or `"unknown"` outside one.
pub fn trace_id() -> String {
    current().unwrap_or_else(|| UNKNOWN.to_string())
}

/// Trace id of the current request, if any.
pub fn current() -> Option<String> {
    TRACE_ID
        .try_with(|cell| cell.borrow().clone())
        .ok()
        .flatten()
}

/// Run `future` with `trace_id` visible to [`trace_id`].
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}
