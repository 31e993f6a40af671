//! Conditional GET helpers for the card catalog fingerprint.

use actix_web::http::header::{HeaderMap, IF_NONE_MATCH};

/// Strip the weak prefix so `W/"x"` and `"x"` compare equal (RFC 9110 weak comparison).
fn opaque_tag(tag: &str) -> &str {
    tag.trim().trim_start_matches("W/")
}

/// True when an `If-None-Match` value matches `etag`.
///
/// Accepts `*` and comma-separated lists.
pub fn if_none_match_matches(header_value: &str, etag: &str) -> bool {
    let current = opaque_tag(etag);
    header_value.trim() == "*"
        || header_value
            .split(',')
            .map(opaque_tag)
            .any(|candidate| candidate == current)
}

/// Whether the request's `If-None-Match` header matches `etag`.
pub fn not_modified(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get(IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| if_none_match_matches(value, etag))
}
