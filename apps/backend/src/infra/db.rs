use std::future::Future;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 3;
const CONNECT_INTERVAL_MS: u64 = 250;

/// Strip credentials from a database URL before it reaches the logs.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.rsplit_once('@') {
        Some((_, host)) => format!("{scheme}://***@{host}"),
        None => url.to_string(),
    }
}

/// Retry a connection attempt with fixed interval delays.
/// Returns the result of the last attempt after all retries are exhausted.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut last_error = None;
    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, "connection retry succeeded");
                }
                return Ok(result);
            }
            Err(e) => {
                if attempt < max_attempts {
                    warn!(attempt, max_attempts, error = %e, "connection attempt failed");
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
                last_error = Some(e);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| AppError::db_unavailable("no connection attempts made")))
}

/// Connect to `url` and bring the schema up to date.
///
/// An in-memory SQLite database lives per connection, so its pool is
/// pinned to a single connection.
pub async fn connect_and_migrate(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(url.to_string());
    opts.connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    if url.contains(":memory:") || url.contains("mode=memory") {
        opts.max_connections(1).min_connections(1);
    }

    let conn = retry_connection(
        || {
            let opts = opts.clone();
            async move {
                Database::connect(opts)
                    .await
                    .map_err(|e| AppError::db_unavailable(e.to_string()))
            }
        },
        CONNECT_ATTEMPTS,
        CONNECT_INTERVAL_MS,
    )
    .await?;

    migration::migrate_up(&conn).await?;
    info!(url = %sanitize_db_url(url), "database ready");
    Ok(conn)
}
