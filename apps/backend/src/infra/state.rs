use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::DeckCatalog;
use crate::config::{LlmSettings, Settings, StorageSettings};
use crate::error::AppError;
use crate::infra::db::connect_and_migrate;
use crate::llm::{GeminiClient, LlmError, TextGenerator};
use crate::repos::{MemoryReadingStore, ReadingStore, SeaReadingStore};
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
///
/// Explicit overrides win over what `settings` would construct.
pub struct StateBuilder {
    settings: Option<Settings>,
    catalog: Option<Arc<DeckCatalog>>,
    store: Option<Arc<dyn ReadingStore>>,
    generator: Option<Arc<dyn TextGenerator>>,
    generator_set: bool,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            settings: None,
            catalog: None,
            store: None,
            generator: None,
            generator_set: false,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<DeckCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn ReadingStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Inject the text generator; `None` disables generative mode.
    pub fn with_generator(mut self, generator: Option<Arc<dyn TextGenerator>>) -> Self {
        self.generator = generator;
        self.generator_set = true;
        self
    }

    /// Assemble the state. Only a catalog that fails to load is fatal.
    pub async fn build(self) -> Result<AppState, AppError> {
        let catalog = match (self.catalog, &self.settings) {
            (Some(catalog), _) => catalog,
            (None, Some(settings)) => Arc::new(DeckCatalog::new(settings.catalog.clone())),
            (None, None) => {
                return Err(AppError::config(
                    "state needs either settings or an explicit catalog",
                ))
            }
        };
        catalog.load()?;

        let store = match self.store {
            Some(store) => store,
            None => match &self.settings {
                Some(settings) => select_store(&settings.storage).await,
                None => Arc::new(MemoryReadingStore::new()),
            },
        };

        let generator = if self.generator_set {
            self.generator
        } else {
            self.settings
                .as_ref()
                .and_then(|settings| build_generator(&settings.llm))
        };

        info!(
            backend = store.backend_name(),
            generative = generator.is_some(),
            "application state ready"
        );
        Ok(AppState::new(catalog, store, generator))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

/// Relational store when configured and reachable, otherwise in-memory.
pub async fn select_store(storage: &StorageSettings) -> Arc<dyn ReadingStore> {
    if !storage.use_db {
        return Arc::new(MemoryReadingStore::new());
    }
    let Some(url) = storage.db_url.as_deref() else {
        warn!("USE_DB is set but DB_URL is missing; using in-memory store");
        return Arc::new(MemoryReadingStore::new());
    };
    match connect_and_migrate(url).await {
        Ok(conn) => Arc::new(SeaReadingStore::new(conn)),
        Err(e) => {
            warn!(error = %e, "database unavailable; using in-memory store");
            Arc::new(MemoryReadingStore::new())
        }
    }
}

fn build_generator(llm: &LlmSettings) -> Option<Arc<dyn TextGenerator>> {
    match GeminiClient::new(llm) {
        Ok(client) => Some(Arc::new(client)),
        Err(LlmError::NotConfigured) => {
            info!("no API key configured; generative mode disabled");
            None
        }
        Err(e) => {
            warn!(error = %e, "text generator unavailable; generative mode disabled");
            None
        }
    }
}
