//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return raw `sea_orm::DbErr`; the store maps it here so higher
//! layers only ever see `DomainError`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column" messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    error_msg[start..]
        .split(|c: char| c.is_whitespace() || c == '"' || c == ',')
        .next()
        .filter(|s| !s.is_empty())
}

fn is_share_slug_collision(error_msg: &str) -> bool {
    match extract_sqlite_table_column(error_msg) {
        Some(table_column) => table_column == "share_links.slug",
        None => error_msg.contains("share_links_pkey"),
    }
}

/// True when the error is a unique violation on the share slug column.
///
/// The store retries slug minting on exactly this condition.
pub fn is_slug_collision(e: &sea_orm::DbErr) -> bool {
    let msg = e.to_string();
    is_unique_violation(&msg) && is_share_slug_collision(&msg)
}

fn is_unique_violation(msg: &str) -> bool {
    mentions_sqlstate(msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

/// Translate a `DbErr` into a `DomainError` with a sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        sea_orm::DbErr::Json(_) | sea_orm::DbErr::Type(_) => {
            error!(trace_id = %trace_id, raw_error = %error_msg, "Stored row failed to decode");
            return DomainError::infra(InfraErrorKind::DataCorruption, "Stored data is corrupt");
        }
        _ => {}
    }

    if is_unique_violation(&error_msg) {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");
        if is_share_slug_collision(&error_msg) {
            return DomainError::conflict(
                ConflictKind::Other("ShareSlug".into()),
                "Share slug already exists",
            );
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::not_found(NotFoundKind::Reading, "Referenced reading not found");
    }

    if error_msg.contains("timeout")
        || error_msg.contains("pool")
        || error_msg.contains("unavailable")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
