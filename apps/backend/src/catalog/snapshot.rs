use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde_json::Value;
use serde_with::formats::PreferMany;
use serde_with::{serde_as, OneOrMany};
use tracing::{debug, info, warn};

use super::{CatalogError, CatalogSources};
use crate::domain::lang::{meaning_fallback_chain, Lang};
use crate::domain::{Card, DECK_SIZE};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeaningEntry {
    pub upright: Vec<String>,
    pub reversed: Vec<String>,
}

impl MeaningEntry {
    fn for_orientation(&self, is_reversed: bool) -> &[String] {
        if is_reversed {
            &self.reversed
        } else {
            &self.upright
        }
    }
}

pub type MeaningTable = HashMap<u8, MeaningEntry>;

/// Wire shape of one entry in a meanings file.
#[serde_as]
#[derive(Debug, Deserialize)]
struct RawMeanings {
    #[serde_as(as = "Option<OneOrMany<_, PreferMany>>")]
    #[serde(default)]
    upright: Option<Vec<String>>,
    #[serde_as(as = "Option<OneOrMany<_, PreferMany>>")]
    #[serde(default)]
    reversed: Option<Vec<String>>,
}

/// An immutable, fully loaded catalog.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    cards: Vec<Card>,
    index: HashMap<u8, usize>,
    tables: HashMap<String, MeaningTable>,
    etag: String,
}

impl CatalogSnapshot {
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), HashMap::new())
    }

    /// Assemble a snapshot from already-parsed parts. The fingerprint covers card ids only.
    pub fn from_parts(cards: Vec<Card>, tables: HashMap<String, MeaningTable>) -> Self {
        let etag = fingerprint(&cards, None);
        let index = index_cards(&cards);
        Self {
            cards,
            index,
            tables,
            etag,
        }
    }

    pub(super) fn build(sources: &CatalogSources) -> Result<Self, CatalogError> {
        let mut cards = read_cards(&sources.data_path)?;

        if sources.prefer_local_images {
            apply_local_images(&mut cards, &sources.static_cards_dir);
        }

        let mut meanings_mtime = None;
        if let Some(path) = sources.meanings_path.as_deref().filter(|p| p.exists()) {
            match read_meaning_table(path) {
                Ok(table) => merge_into_cards(&mut cards, &table, path),
                Err(e) => warn!(path = %path.display(), error = %e, "failed to merge meanings file"),
            }
            meanings_mtime = mtime_nanos(path);
        }

        let mut tables = HashMap::new();
        for lang in Lang::ALL {
            let path = sources
                .meanings_dir
                .join(format!("meanings.{}.json", lang.as_str()));
            if !path.exists() {
                continue;
            }
            match read_meaning_table(&path) {
                Ok(table) => {
                    info!(lang = lang.as_str(), card_count = table.len(), "loaded meanings table");
                    tables.insert(lang.as_str().to_string(), table);
                }
                Err(e) => {
                    warn!(lang = lang.as_str(), path = %path.display(), error = %e, "failed to load meanings table")
                }
            }
        }

        let etag = fingerprint(&cards, meanings_mtime);
        let index = index_cards(&cards);
        Ok(Self {
            cards,
            index,
            tables,
            etag,
        })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: u8) -> Option<&Card> {
        self.index.get(&id).map(|&i| &self.cards[i])
    }

    pub fn etag(&self) -> &str {
        &self.etag
    }

    /// Language codes with a loaded meanings table, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }

    /// Resolve a card's meanings for a language.
    ///
    /// Walks the language's fallback chain of tables, then the card's
    /// embedded meanings. Empty lists count as misses.
    pub fn get_meanings(&self, card_id: u8, lang: &str, is_reversed: bool) -> Option<&[String]> {
        for code in meaning_fallback_chain(lang) {
            let hit = self
                .tables
                .get(&code)
                .and_then(|table| table.get(&card_id))
                .map(|entry| entry.for_orientation(is_reversed))
                .filter(|vals| !vals.is_empty());
            if hit.is_some() {
                return hit;
            }
        }
        self.card(card_id)
            .and_then(|card| card.embedded_meanings(is_reversed))
    }
}

fn index_cards(cards: &[Card]) -> HashMap<u8, usize> {
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| (card.id, i))
        .collect()
}

fn read_json(path: &Path) -> Result<Value, CatalogError> {
    let bytes = fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_cards(path: &Path) -> Result<Vec<Card>, CatalogError> {
    let Value::Array(items) = read_json(path)? else {
        return Err(CatalogError::NotAList {
            path: path.to_path_buf(),
        });
    };

    let mut cards = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Card>(item) {
            Ok(card) => cards.push(card),
            Err(e) => warn!(index, error = %e, "skipping malformed card record"),
        }
    }

    if cards.len() != DECK_SIZE {
        warn!(
            card_count = cards.len(),
            expected = DECK_SIZE,
            "deck does not have the expected number of cards"
        );
    }
    Ok(cards)
}

fn apply_local_images(cards: &mut [Card], dir: &Path) {
    let mut applied = 0usize;
    for card in cards.iter_mut() {
        let file = format!("{:02}.jpg", card.id);
        if dir.join(&file).exists() {
            card.image_url = Some(format!("/static/cards/{file}"));
            applied += 1;
        }
    }
    debug!(applied, "applied local card images");
}

/// Parse a `{ "<id>": {upright, reversed} }` file. Bad entries are skipped.
fn read_meaning_table(path: &Path) -> Result<MeaningTable, CatalogError> {
    let Value::Object(entries) = read_json(path)? else {
        warn!(path = %path.display(), "meanings file is not an object; ignoring");
        return Ok(MeaningTable::new());
    };

    let mut table = MeaningTable::with_capacity(entries.len());
    for (key, value) in entries {
        let Ok(id) = key.trim().parse::<u8>() else {
            warn!(path = %path.display(), key = %key, "skipping meanings entry with non-numeric id");
            continue;
        };
        match serde_json::from_value::<RawMeanings>(value) {
            Ok(raw) => {
                table.insert(
                    id,
                    MeaningEntry {
                        upright: raw.upright.unwrap_or_default(),
                        reversed: raw.reversed.unwrap_or_default(),
                    },
                );
            }
            Err(e) => warn!(path = %path.display(), id, error = %e, "skipping malformed meanings entry"),
        }
    }
    Ok(table)
}

fn merge_into_cards(cards: &mut [Card], table: &MeaningTable, path: &Path) {
    let mut merged = 0usize;
    for card in cards.iter_mut() {
        let Some(entry) = table.get(&card.id) else {
            continue;
        };
        if !entry.upright.is_empty() {
            card.upright_meaning = Some(entry.upright.clone());
        }
        if !entry.reversed.is_empty() {
            card.reversed_meaning = Some(entry.reversed.clone());
        }
        merged += 1;
    }
    info!(merged, path = %path.display(), "merged meanings into cards");
}

fn mtime_nanos(path: &Path) -> Option<u128> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_nanos())
}

/// Weak ETag over the card ids and, when present, the meanings file mtime.
fn fingerprint(cards: &[Card], meanings_mtime: Option<u128>) -> String {
    let ids = cards
        .iter()
        .map(|c| c.id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let mut hasher = blake3::Hasher::new();
    hasher.update(ids.as_bytes());
    if let Some(nanos) = meanings_mtime {
        hasher.update(nanos.to_string().as_bytes());
    }
    format!("W/\"{}\"", hasher.finalize().to_hex())
}
