//! Deck catalog: the fixed card list plus per-language meaning tables.
//!
//! A load builds a complete [`CatalogSnapshot`] off to the side and swaps it
//! in under a write lock, so readers holding an `Arc` from before the reload
//! keep a consistent view.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::info;

pub mod snapshot;

pub use snapshot::{CatalogSnapshot, MeaningEntry, MeaningTable};

use crate::domain::Card;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("deck file {path} must contain a JSON list")]
    NotAList { path: PathBuf },
}

/// Where the catalog reads its inputs from.
#[derive(Debug, Clone)]
pub struct CatalogSources {
    /// Base card list (JSON array).
    pub data_path: PathBuf,
    /// Optional consolidated `{id: {upright, reversed}}` file merged into the cards.
    pub meanings_path: Option<PathBuf>,
    /// Directory holding `meanings.{lang}.json`.
    pub meanings_dir: PathBuf,
    /// Directory holding local `{id:02}.jpg` images.
    pub static_cards_dir: PathBuf,
    pub prefer_local_images: bool,
}

pub struct DeckCatalog {
    sources: Option<CatalogSources>,
    current: RwLock<Option<Arc<CatalogSnapshot>>>,
}

impl DeckCatalog {
    pub fn new(sources: CatalogSources) -> Self {
        Self {
            sources: Some(sources),
            current: RwLock::new(None),
        }
    }

    /// A catalog pinned to an in-memory snapshot; `load` keeps returning it.
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self {
            sources: None,
            current: RwLock::new(Some(Arc::new(snapshot))),
        }
    }

    /// Rebuild the snapshot from the sources and swap it in.
    pub fn load(&self) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        let Some(sources) = &self.sources else {
            let pinned = self.current.read().clone();
            return Ok(pinned.unwrap_or_else(|| Arc::new(CatalogSnapshot::empty())));
        };

        let fresh = Arc::new(CatalogSnapshot::build(sources)?);
        info!(
            card_count = fresh.cards().len(),
            languages = ?fresh.languages(),
            etag = %fresh.etag(),
            "deck catalog loaded"
        );
        *self.current.write() = Some(Arc::clone(&fresh));
        Ok(fresh)
    }

    /// Current snapshot, loading on first access.
    pub fn snapshot(&self) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        if let Some(snapshot) = self.current.read().as_ref() {
            return Ok(Arc::clone(snapshot));
        }
        self.load()
    }

    /// Read-only view of the cards, loading on first access.
    pub fn cards(&self) -> Result<Vec<Card>, CatalogError> {
        Ok(self.snapshot()?.cards().to_vec())
    }

    /// Fingerprint of the current snapshot; `None` before the first load.
    pub fn etag(&self) -> Option<String> {
        self.current
            .read()
            .as_ref()
            .map(|snapshot| snapshot.etag().to_string())
    }

    pub fn get_meanings(
        &self,
        card_id: u8,
        lang: &str,
        is_reversed: bool,
    ) -> Result<Option<Vec<String>>, CatalogError> {
        Ok(self
            .snapshot()?
            .get_meanings(card_id, lang, is_reversed)
            .map(<[String]>::to_vec))
    }
}
