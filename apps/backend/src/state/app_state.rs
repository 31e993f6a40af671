use std::sync::Arc;

use crate::catalog::DeckCatalog;
use crate::llm::TextGenerator;
use crate::repos::ReadingStore;

/// Shared resources handed to every request handler.
///
/// Built once at startup by [`StateBuilder`](crate::infra::state::StateBuilder)
/// and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<DeckCatalog>,
    pub store: Arc<dyn ReadingStore>,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl AppState {
    pub fn new(
        catalog: Arc<DeckCatalog>,
        store: Arc<dyn ReadingStore>,
        generator: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        Self {
            catalog,
            store,
            generator,
        }
    }

    /// The text generator, if generative mode is available.
    pub fn generator(&self) -> Option<&dyn TextGenerator> {
        self.generator.as_deref()
    }

    pub fn generative_available(&self) -> bool {
        self.generator.is_some()
    }
}
