//! Interpretation engine.
//!
//! Local mode renders fixed per-language templates. Generative mode asks a
//! [`TextGenerator`](crate::llm::TextGenerator) for structured JSON and falls
//! back to local output on any failure; it never returns an error.

pub mod generative;
pub mod local;
pub mod sanitize;
pub mod templates;

pub use generative::{explain_cards_with_llm, interpret_with_llm};
pub use local::interpret_local;
pub use sanitize::{sanitize, Sanitizer};

use crate::catalog::CatalogSnapshot;
use crate::domain::DrawnCard;

/// Meanings for a drawn card in `lang`, resolved through the catalog.
///
/// Falls back to the meanings captured on the drawn card itself when the
/// catalog no longer knows the id.
pub(crate) fn meanings_for<'a>(
    snapshot: &'a CatalogSnapshot,
    drawn: &'a DrawnCard,
    lang: &str,
) -> Option<&'a [String]> {
    snapshot
        .get_meanings(drawn.card.id, lang, drawn.is_reversed)
        .or_else(|| drawn.card.embedded_meanings(drawn.is_reversed))
}
