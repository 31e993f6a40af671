use serde::Serialize;

use crate::domain::Card;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::AppState;

pub struct CardList {
    pub cards: Vec<Card>,
    pub etag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardMeanings {
    pub id: u8,
    pub lang: String,
    pub upright: Vec<String>,
    pub reversed: Vec<String>,
}

fn card_not_found(id: i64) -> AppError {
    AppError::not_found(ErrorCode::CardNotFound, format!("Card {id} not found"))
}

pub fn list_cards(state: &AppState) -> Result<CardList, AppError> {
    let snapshot = state.catalog.snapshot()?;
    Ok(CardList {
        cards: snapshot.cards().to_vec(),
        etag: snapshot.etag().to_string(),
    })
}

pub fn get_card(state: &AppState, id: i64) -> Result<Card, AppError> {
    let snapshot = state.catalog.snapshot()?;
    u8::try_from(id)
        .ok()
        .and_then(|id| snapshot.card(id))
        .cloned()
        .ok_or_else(|| card_not_found(id))
}

/// Resolved meaning lists for one card, following the language fallback chain.
pub fn get_card_meanings(state: &AppState, id: i64, lang: &str) -> Result<CardMeanings, AppError> {
    let card = get_card(state, id)?;
    let lang = lang.trim().to_ascii_lowercase();
    let upright = state.catalog.get_meanings(card.id, &lang, false)?;
    let reversed = state.catalog.get_meanings(card.id, &lang, true)?;
    Ok(CardMeanings {
        id: card.id,
        lang,
        upright: upright.unwrap_or_default(),
        reversed: reversed.unwrap_or_default(),
    })
}
