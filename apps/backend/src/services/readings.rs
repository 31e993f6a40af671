use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::dealing::create_reading as draw_reading;
use crate::domain::reading::validate_question;
use crate::domain::{DrawnCard, GroupOrder, NewReading, Reading};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::AppState;

/// Caller input for a new reading, already shape-checked.
#[derive(Debug, Clone)]
pub struct CreateReading {
    pub question: String,
    pub order: GroupOrder,
    pub shuffle_times: u8,
    pub seed: Option<i64>,
    pub allow_reversed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingView {
    pub id: String,
    pub question: String,
    pub order: GroupOrder,
    pub count: usize,
    pub items: Vec<DrawnCard>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Reading> for ReadingView {
    fn from(reading: Reading) -> Self {
        Self {
            count: reading.items.len(),
            id: reading.id,
            question: reading.question,
            order: reading.order,
            items: reading.items,
            created_at: reading.created_at,
        }
    }
}

/// Validate, draw eight cards, persist, and mint a share alias best-effort.
pub async fn create_reading(state: &AppState, input: CreateReading) -> Result<Reading, AppError> {
    validate_question(&input.question)?;
    let snapshot = state.catalog.snapshot()?;
    let items = draw_reading(
        snapshot.cards(),
        input.order,
        input.shuffle_times,
        input.seed,
        input.allow_reversed,
    )?;

    let reading = state
        .store
        .create(NewReading {
            question: input.question,
            order: input.order,
            shuffle_times: input.shuffle_times,
            seed: input.seed,
            allow_reversed: input.allow_reversed,
            items,
        })
        .await?;
    info!(
        reading_id = %reading.id,
        seeded = reading.seed.is_some(),
        shuffle_times = reading.shuffle_times,
        "reading created"
    );

    if let Err(e) = state.store.create_share_slug(&reading.id).await {
        debug!(reading_id = %reading.id, error = %e, "share alias not minted");
    }
    Ok(reading)
}

pub async fn get_reading(state: &AppState, id: &str) -> Result<Reading, AppError> {
    state
        .store
        .get(id)
        .await?
        .ok_or_else(|| reading_not_found(id))
}

pub(crate) fn reading_not_found(id: &str) -> AppError {
    AppError::not_found(ErrorCode::ReadingNotFound, format!("Reading {id} not found"))
}
