//! Share slug generation for readings.
//!
//! A slug is `{unix_millis}-{token}` where the token is six characters of
//! Crockford's Base32 alphabet. The timestamp keeps slugs roughly sortable;
//! the token separates slugs minted in the same millisecond.

use std::sync::Arc;

use rand::Rng;
use time::OffsetDateTime;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U
const TOKEN_LEN: usize = 6;

/// Attempts a store makes before giving up on a colliding slug.
pub const MAX_SLUG_ATTEMPTS: usize = 5;

/// Source of candidate slugs; swapped out in tests to force collisions.
pub type SlugGenerator = Arc<dyn Fn() -> String + Send + Sync>;

pub fn default_generator() -> SlugGenerator {
    Arc::new(generate_share_slug)
}

pub fn generate_share_slug() -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let mut rng = rand::rng();
    let token: String = (0..TOKEN_LEN)
        .map(|_| CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char)
        .collect();
    format!("{millis}-{token}")
}
