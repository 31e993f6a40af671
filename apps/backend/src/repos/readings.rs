//! Storage contract shared by the in-memory and relational backends.

use async_trait::async_trait;

use crate::domain::{Interpretation, NewReading, Reading};
use crate::errors::domain::DomainError;

/// Cache key for a whole interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterpretationKey {
    pub reading_id: String,
    pub lang: String,
    pub style: String,
    pub use_llm: bool,
}

impl InterpretationKey {
    pub fn new(
        reading_id: impl Into<String>,
        lang: impl Into<String>,
        style: impl Into<String>,
        use_llm: bool,
    ) -> Self {
        Self {
            reading_id: reading_id.into(),
            lang: lang.into(),
            style: style.into(),
            use_llm,
        }
    }
}

/// Cache key for the per-card detail list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DetailsKey {
    pub reading_id: String,
    pub lang: String,
    pub use_llm: bool,
}

impl DetailsKey {
    pub fn new(reading_id: impl Into<String>, lang: impl Into<String>, use_llm: bool) -> Self {
        Self {
            reading_id: reading_id.into(),
            lang: lang.into(),
            use_llm,
        }
    }
}

/// Durable or ephemeral home for readings, their caches and share slugs.
///
/// Saves overwrite (last writer wins). Lookups of missing keys return
/// `Ok(None)`; errors are reserved for backend failures.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Short label for logs and health output.
    fn backend_name(&self) -> &'static str;

    /// Assign a fresh id and persist the reading atomically.
    async fn create(&self, reading: NewReading) -> Result<Reading, DomainError>;

    async fn get(&self, id: &str) -> Result<Option<Reading>, DomainError>;

    async fn get_interpretation(
        &self,
        key: &InterpretationKey,
    ) -> Result<Option<Interpretation>, DomainError>;

    async fn save_interpretation(
        &self,
        key: &InterpretationKey,
        interpretation: &Interpretation,
    ) -> Result<(), DomainError>;

    async fn get_details(&self, key: &DetailsKey) -> Result<Option<Vec<String>>, DomainError>;

    async fn save_details(&self, key: &DetailsKey, details: &[String]) -> Result<(), DomainError>;

    /// Existing slug for the reading, or a newly minted collision-free one.
    async fn create_share_slug(&self, reading_id: &str) -> Result<String, DomainError>;

    async fn resolve_share_slug(&self, slug: &str) -> Result<Option<String>, DomainError>;
}
