#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod infra;
pub mod interpret;
pub mod llm;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;
pub mod utils;

// Re-exports for public API
pub use catalog::{CatalogError, CatalogSources, DeckCatalog};
pub use config::Settings;
pub use error::AppError;
pub use infra::db::connect_and_migrate;
pub use infra::state::{build_state, StateBuilder};
pub use llm::{LlmError, TextGenerator};
pub use middleware::{RequestTrace, StructuredLogger, TraceSpan};
pub use repos::{MemoryReadingStore, ReadingStore, SeaReadingStore};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
