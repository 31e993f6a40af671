//! Relational backend over SeaORM (SQLite or Postgres).

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection};
use time::OffsetDateTime;
use tracing::{debug, warn};
use uuid::Uuid;

use super::readings::{DetailsKey, InterpretationKey, ReadingStore};
use crate::adapters::readings_sea as adapter;
use crate::domain::{Interpretation, NewReading, Reading};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::infra::db_errors::{is_slug_collision, map_db_err};
use crate::utils::share_slug::{default_generator, SlugGenerator, MAX_SLUG_ATTEMPTS};

pub struct SeaReadingStore {
    db: DatabaseConnection,
    slugs: SlugGenerator,
}

impl SeaReadingStore {
    /// Wrap an already-migrated connection.
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_slug_generator(db, default_generator())
    }

    pub fn with_slug_generator(db: DatabaseConnection, slugs: SlugGenerator) -> Self {
        Self { db, slugs }
    }
}

#[async_trait]
impl ReadingStore for SeaReadingStore {
    fn backend_name(&self) -> &'static str {
        match self.db.get_database_backend() {
            DatabaseBackend::Postgres => "postgres",
            DatabaseBackend::Sqlite => "sqlite",
            DatabaseBackend::MySql => "mysql",
        }
    }

    async fn create(&self, reading: NewReading) -> Result<Reading, DomainError> {
        let reading = reading.into_reading(Uuid::new_v4().to_string(), OffsetDateTime::now_utc());
        adapter::insert_reading(&self.db, &reading)
            .await
            .map_err(map_db_err)?;
        debug!(reading_id = %reading.id, "Reading persisted");
        Ok(reading)
    }

    async fn get(&self, id: &str) -> Result<Option<Reading>, DomainError> {
        adapter::find_reading(&self.db, id).await.map_err(map_db_err)
    }

    async fn get_interpretation(
        &self,
        key: &InterpretationKey,
    ) -> Result<Option<Interpretation>, DomainError> {
        adapter::find_interpretation(&self.db, &key.reading_id, &key.lang, &key.style, key.use_llm)
            .await
            .map_err(map_db_err)
    }

    async fn save_interpretation(
        &self,
        key: &InterpretationKey,
        interpretation: &Interpretation,
    ) -> Result<(), DomainError> {
        adapter::upsert_interpretation(
            &self.db,
            &key.reading_id,
            &key.lang,
            &key.style,
            key.use_llm,
            interpretation,
        )
        .await
        .map_err(map_db_err)
    }

    async fn get_details(&self, key: &DetailsKey) -> Result<Option<Vec<String>>, DomainError> {
        adapter::find_details(&self.db, &key.reading_id, &key.lang, key.use_llm)
            .await
            .map_err(map_db_err)
    }

    async fn save_details(&self, key: &DetailsKey, details: &[String]) -> Result<(), DomainError> {
        adapter::upsert_details(&self.db, &key.reading_id, &key.lang, key.use_llm, details)
            .await
            .map_err(map_db_err)
    }

    async fn create_share_slug(&self, reading_id: &str) -> Result<String, DomainError> {
        if let Some(existing) = adapter::find_slug_for_reading(&self.db, reading_id)
            .await
            .map_err(map_db_err)?
        {
            return Ok(existing);
        }
        if !adapter::reading_exists(&self.db, reading_id)
            .await
            .map_err(map_db_err)?
        {
            return Err(DomainError::not_found(
                NotFoundKind::Reading,
                format!("reading {reading_id} not found"),
            ));
        }

        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let slug = (self.slugs)();
            match adapter::insert_share_link(&self.db, &slug, reading_id).await {
                Ok(()) => return Ok(slug),
                Err(e) if is_slug_collision(&e) => {
                    warn!(attempt, "Share slug collision, retrying");
                }
                Err(e) => {
                    // A concurrent request may have linked this reading first.
                    if let Some(existing) = adapter::find_slug_for_reading(&self.db, reading_id)
                        .await
                        .map_err(map_db_err)?
                    {
                        return Ok(existing);
                    }
                    return Err(map_db_err(e));
                }
            }
        }
        Err(DomainError::conflict(
            ConflictKind::ShareSlugExhausted,
            format!("could not mint a unique share slug in {MAX_SLUG_ATTEMPTS} attempts"),
        ))
    }

    async fn resolve_share_slug(&self, slug: &str) -> Result<Option<String>, DomainError> {
        adapter::find_reading_for_slug(&self.db, slug)
            .await
            .map_err(map_db_err)
    }
}
