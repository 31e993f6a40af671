use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::readings::get_reading;
use super::CardWithContext;
use crate::domain::{Interpretation, Lang, Reading, RequestedLang, Section};
use crate::error::AppError;
use crate::interpret::{explain_cards_with_llm, interpret_local, interpret_with_llm};
use crate::repos::{DetailsKey, InterpretationKey};
use crate::state::AppState;

pub const DEFAULT_STYLE: &str = "concise";

/// Full results always use this style label in the interpretation cache.
pub const FULL_RESULT_STYLE: &str = "concise";

#[derive(Debug, Clone)]
pub struct InterpretRequest {
    pub lang: RequestedLang,
    pub style: String,
    pub use_llm: bool,
}

impl Default for InterpretRequest {
    fn default() -> Self {
        Self {
            lang: RequestedLang::default(),
            style: DEFAULT_STYLE.to_string(),
            use_llm: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullResult {
    pub id: String,
    pub question: String,
    pub lang: String,
    pub items: Vec<CardWithContext>,
    pub summary: String,
    pub advices: Vec<String>,
    pub llm_used: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<BTreeMap<String, Section>>,
}

/// Cache-checked interpretation of a stored reading.
///
/// Generative mode is used only when requested and a generator is
/// configured; the cache key records the mode actually used.
pub async fn interpret(
    state: &AppState,
    reading_id: &str,
    request: &InterpretRequest,
) -> Result<Interpretation, AppError> {
    let reading = get_reading(state, reading_id).await?;
    let lang = request.lang.resolve(&reading.question);
    let use_llm = request.use_llm && state.generative_available();
    load_or_compute(state, &reading, lang, &request.style, use_llm).await
}

async fn load_or_compute(
    state: &AppState,
    reading: &Reading,
    lang: Lang,
    style: &str,
    use_llm: bool,
) -> Result<Interpretation, AppError> {
    let key = InterpretationKey::new(&reading.id, lang.as_str(), style, use_llm);
    if let Some(cached) = state.store.get_interpretation(&key).await? {
        debug!(reading_id = %reading.id, lang = lang.as_str(), style, use_llm, "interpretation cache hit");
        return Ok(cached);
    }

    let snapshot = state.catalog.snapshot()?;
    let fresh = if use_llm {
        interpret_with_llm(reading, &snapshot, lang, state.generator()).await
    } else {
        interpret_local(reading, &snapshot, lang)
    };
    state.store.save_interpretation(&key, &fresh).await?;
    Ok(fresh)
}

async fn load_or_explain(
    state: &AppState,
    reading: &Reading,
    lang: Lang,
) -> Result<Vec<String>, AppError> {
    let key = DetailsKey::new(&reading.id, lang.as_str(), true);
    if let Some(cached) = state.store.get_details(&key).await? {
        if !cached.is_empty() {
            return Ok(cached);
        }
    }
    let snapshot = state.catalog.snapshot()?;
    let details = explain_cards_with_llm(reading, &snapshot, lang, state.generator()).await;
    state.store.save_details(&key, &details).await?;
    Ok(details)
}

/// Reading, per-card context and interpretation in one view.
///
/// Per-card generative details are attached only in generative mode.
pub async fn get_full_result(
    state: &AppState,
    reading_id: &str,
    lang: RequestedLang,
    use_llm: bool,
) -> Result<FullResult, AppError> {
    let reading = get_reading(state, reading_id).await?;
    let lang = lang.resolve(&reading.question);
    let use_llm = use_llm && state.generative_available();

    let snapshot = state.catalog.snapshot()?;
    let mut items: Vec<CardWithContext> = reading
        .items
        .iter()
        .map(|drawn| CardWithContext::build(&snapshot, drawn, lang))
        .collect();

    let interpretation = load_or_compute(state, &reading, lang, FULL_RESULT_STYLE, use_llm).await?;

    if use_llm {
        let details = load_or_explain(state, &reading, lang).await?;
        for (item, detail) in items.iter_mut().zip(details) {
            item.llm_detail = Some(detail);
        }
    }

    Ok(FullResult {
        id: reading.id,
        question: reading.question,
        lang: lang.as_str().to_string(),
        items,
        summary: interpretation.summary,
        advices: interpretation.advices,
        llm_used: interpretation.llm_used,
        sections: interpretation.sections,
    })
}
