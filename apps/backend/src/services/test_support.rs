//! Shared fixtures for service tests.

use std::collections::HashMap;
use std::sync::Arc;

use super::readings::CreateReading;
use crate::catalog::{CatalogSnapshot, DeckCatalog};
use crate::domain::test_gens::sample_deck;
use crate::domain::GroupOrder;
use crate::llm::TextGenerator;
use crate::repos::MemoryReadingStore;
use crate::state::AppState;

pub fn state_with(generator: Option<Arc<dyn TextGenerator>>) -> AppState {
    let catalog = DeckCatalog::from_snapshot(CatalogSnapshot::from_parts(
        sample_deck(78),
        HashMap::new(),
    ));
    AppState::new(
        Arc::new(catalog),
        Arc::new(MemoryReadingStore::new()),
        generator,
    )
}

pub fn ko_request(seed: Option<i64>) -> CreateReading {
    CreateReading {
        question: "올해 이직 운은?".to_string(),
        order: GroupOrder::ABC,
        shuffle_times: 3,
        seed,
        allow_reversed: true,
    }
}
