use serde::Serialize;
use time::OffsetDateTime;

use super::CardWithContext;
use crate::domain::dealing::draw_spread;
use crate::domain::{GroupOrder, Lang, Reading, RequestedLang};
use crate::error::AppError;
use crate::interpret::{interpret_local, interpret_with_llm};
use crate::state::AppState;

/// The daily card is a one-card spread through the regular engine.
const DAILY_CARD_COUNT: usize = 1;
const DAILY_SHUFFLE_TIMES: u8 = 1;

/// Prompt question; `auto` resolves against the primary-language text.
pub fn daily_question(lang: Lang) -> &'static str {
    match lang {
        Lang::Ko => "오늘의 총운",
        Lang::En => "Today's overall fortune",
        Lang::Ja => "今日の総合運",
        Lang::Zh => "今日总体运势",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyFortune {
    /// UTC calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub lang: String,
    pub card: CardWithContext,
    pub summary: String,
    pub llm_used: bool,
}

/// Draw and interpret today's card. Nothing is persisted.
pub async fn daily_fortune(
    state: &AppState,
    lang: RequestedLang,
    seed: Option<i64>,
    use_llm: bool,
) -> Result<DailyFortune, AppError> {
    let now = OffsetDateTime::now_utc();
    let lang = lang.resolve(daily_question(Lang::Ko));
    let snapshot = state.catalog.snapshot()?;

    let items = draw_spread(
        snapshot.cards(),
        GroupOrder::ABC,
        DAILY_SHUFFLE_TIMES,
        seed,
        true,
        DAILY_CARD_COUNT,
    )?;
    let Some(drawn) = items.first().cloned() else {
        return Err(AppError::internal("daily draw returned no card"));
    };

    let reading = Reading {
        id: String::new(),
        question: daily_question(lang).to_string(),
        order: GroupOrder::ABC,
        shuffle_times: DAILY_SHUFFLE_TIMES,
        seed,
        allow_reversed: true,
        items,
        created_at: now,
    };

    let interpretation = if use_llm && state.generative_available() {
        interpret_with_llm(&reading, &snapshot, lang, state.generator()).await
    } else {
        interpret_local(&reading, &snapshot, lang)
    };

    Ok(DailyFortune {
        date: now.date().to_string(),
        lang: lang.as_str().to_string(),
        card: CardWithContext::build(&snapshot, &drawn, lang),
        summary: interpretation.summary,
        llm_used: interpretation.llm_used,
    })
}
