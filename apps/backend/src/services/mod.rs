//! Orchestration between the catalog, the draw engine, the store and the
//! interpretation engine. Handlers call these and nothing below them.

pub mod cards;
pub mod daily;
pub mod interpretations;
pub mod readings;
pub mod share;

use serde::Serialize;

use crate::catalog::CatalogSnapshot;
use crate::domain::{Card, DrawnCard, Lang};
use crate::interpret::meanings_for;

/// Meanings shown next to each card in result views.
pub const USED_MEANINGS: usize = 3;

/// A drawn card with its role and the meanings used to read it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardWithContext {
    pub position: u8,
    pub role: String,
    pub is_reversed: bool,
    pub used_meanings: Option<Vec<String>>,
    pub card: Card,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_detail: Option<String>,
}

impl CardWithContext {
    pub(crate) fn build(snapshot: &CatalogSnapshot, drawn: &DrawnCard, lang: Lang) -> Self {
        Self {
            position: drawn.position,
            role: lang.role_name(drawn.position).to_string(),
            is_reversed: drawn.is_reversed,
            used_meanings: meanings_for(snapshot, drawn, lang.as_str())
                .map(|m| m.iter().take(USED_MEANINGS).cloned().collect()),
            card: drawn.card.clone(),
            llm_detail: None,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support;
