//! Ephemeral backend: one mutex around plain maps.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use time::OffsetDateTime;
use uuid::Uuid;

use super::readings::{DetailsKey, InterpretationKey, ReadingStore};
use crate::domain::{Interpretation, NewReading, Reading};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::utils::share_slug::{default_generator, SlugGenerator, MAX_SLUG_ATTEMPTS};

#[derive(Default)]
struct Inner {
    readings: HashMap<String, Reading>,
    interpretations: HashMap<InterpretationKey, Interpretation>,
    details: HashMap<DetailsKey, Vec<String>>,
    slug_by_reading: HashMap<String, String>,
    reading_by_slug: HashMap<String, String>,
}

pub struct MemoryReadingStore {
    inner: Mutex<Inner>,
    slugs: SlugGenerator,
}

impl MemoryReadingStore {
    pub fn new() -> Self {
        Self::with_slug_generator(default_generator())
    }

    pub fn with_slug_generator(slugs: SlugGenerator) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            slugs,
        }
    }
}

impl Default for MemoryReadingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadingStore for MemoryReadingStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, reading: NewReading) -> Result<Reading, DomainError> {
        let mut inner = self.inner.lock();
        let mut id = Uuid::new_v4().to_string();
        while inner.readings.contains_key(&id) {
            id = Uuid::new_v4().to_string();
        }
        let reading = reading.into_reading(id.clone(), OffsetDateTime::now_utc());
        inner.readings.insert(id, reading.clone());
        Ok(reading)
    }

    async fn get(&self, id: &str) -> Result<Option<Reading>, DomainError> {
        Ok(self.inner.lock().readings.get(id).cloned())
    }

    async fn get_interpretation(
        &self,
        key: &InterpretationKey,
    ) -> Result<Option<Interpretation>, DomainError> {
        Ok(self.inner.lock().interpretations.get(key).cloned())
    }

    async fn save_interpretation(
        &self,
        key: &InterpretationKey,
        interpretation: &Interpretation,
    ) -> Result<(), DomainError> {
        self.inner
            .lock()
            .interpretations
            .insert(key.clone(), interpretation.clone());
        Ok(())
    }

    async fn get_details(&self, key: &DetailsKey) -> Result<Option<Vec<String>>, DomainError> {
        Ok(self.inner.lock().details.get(key).cloned())
    }

    async fn save_details(&self, key: &DetailsKey, details: &[String]) -> Result<(), DomainError> {
        self.inner
            .lock()
            .details
            .insert(key.clone(), details.to_vec());
        Ok(())
    }

    async fn create_share_slug(&self, reading_id: &str) -> Result<String, DomainError> {
        let mut inner = self.inner.lock();
        if let Some(existing) = inner.slug_by_reading.get(reading_id) {
            return Ok(existing.clone());
        }
        if !inner.readings.contains_key(reading_id) {
            return Err(DomainError::not_found(
                NotFoundKind::Reading,
                format!("reading {reading_id} not found"),
            ));
        }

        for _ in 0..MAX_SLUG_ATTEMPTS {
            let slug = (self.slugs)();
            if inner.reading_by_slug.contains_key(&slug) {
                continue;
            }
            inner
                .reading_by_slug
                .insert(slug.clone(), reading_id.to_string());
            inner
                .slug_by_reading
                .insert(reading_id.to_string(), slug.clone());
            return Ok(slug);
        }
        Err(DomainError::conflict(
            ConflictKind::ShareSlugExhausted,
            format!("could not mint a unique share slug in {MAX_SLUG_ATTEMPTS} attempts"),
        ))
    }

    async fn resolve_share_slug(&self, slug: &str) -> Result<Option<String>, DomainError> {
        Ok(self.inner.lock().reading_by_slug.get(slug).cloned())
    }
}
