use serde::{Deserialize, Serialize};
use serde_with::formats::PreferMany;
use serde_with::{serde_as, OneOrMany};

/// Number of cards in a complete tarot deck.
pub const DECK_SIZE: usize = 78;

/// Immutable reference data for one tarot card.
///
/// Meaning lists embedded here are the last fallback when no per-language
/// table has an entry for the card. Source files carry them either as a
/// single string or a list; both deserialize into a list.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: u8,
    pub name: String,
    pub arcana: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suit: Option<String>,
    #[serde(default, alias = "img", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde_as(as = "Option<OneOrMany<_, PreferMany>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upright_meaning: Option<Vec<String>>,
    #[serde_as(as = "Option<OneOrMany<_, PreferMany>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reversed_meaning: Option<Vec<String>>,
}

impl Card {
    /// Embedded meanings for the given orientation, if non-empty.
    pub fn embedded_meanings(&self, is_reversed: bool) -> Option<&[String]> {
        let list = if is_reversed {
            self.reversed_meaning.as_deref()
        } else {
            self.upright_meaning.as_deref()
        };
        list.filter(|m| !m.is_empty())
    }
}
