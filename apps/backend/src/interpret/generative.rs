use std::collections::BTreeMap;

use serde_json::{json, Value};
use tracing::{debug, warn};

use super::local::{interpret_local, lines_and_advices, LocalParts, ADVICE_COUNT};
use super::meanings_for;
use super::sanitize::Sanitizer;
use crate::catalog::CatalogSnapshot;
use crate::domain::{Interpretation, Lang, Reading, Section};
use crate::llm::extract::{first_json_array, first_json_object};
use crate::llm::TextGenerator;

/// Positions described in the `sections` object, in prompt order.
const SECTION_POSITIONS: [u8; 6] = [1, 3, 4, 5, 6, 7];

fn card_context(reading: &Reading, snapshot: &CatalogSnapshot, lang: Lang) -> Vec<Value> {
    reading
        .items
        .iter()
        .map(|d| {
            json!({
                "position": d.position,
                "role": lang.role_name(d.position),
                "name": d.card.name,
                "arcana": d.card.arcana,
                "is_reversed": d.is_reversed,
                "meanings": meanings_for(snapshot, d, lang.as_str()).unwrap_or_default(),
            })
        })
        .collect()
}

/// Build the instruction for a structured interpretation.
pub fn build_interpret_prompt(
    reading: &Reading,
    snapshot: &CatalogSnapshot,
    lang: Lang,
) -> String {
    let parts = lines_and_advices(reading, snapshot, lang);
    let draft = json!({
        "question": reading.question,
        "positions": parts.positions,
        "advices": parts.advices,
        "cards": card_context(reading, snapshot, lang),
        "guidelines": [
            "Connect everything through the solution card in position 8",
            "No deterministic claims; use a hypothesis/suggestion tone",
            "Exactly three actionable advices",
        ],
    });

    let roles: Vec<&str> = SECTION_POSITIONS
        .iter()
        .map(|&p| lang.role_name(p))
        .collect();
    let section_schema = roles
        .iter()
        .map(|r| format!("\"{r}\": {{\"card\": string, \"orientation\": string, \"analysis\": string}}"))
        .collect::<Vec<_>>()
        .join(", ");
    let n = reading.items.len();

    format!(
        "You are a tarot master with 30 years of experience. Respond in language: {lang}.\n\
         Use compassionate yet piercing insight. Avoid deterministic claims and avoid medical/legal/financial guidance.\n\
         IMPORTANT: Base ALL interpretation ONLY on the following {n} cards (names/roles/orientation/meanings). Do NOT invent other cards.\n\
         Produce STRICT JSON (minified, no comments, no extra text).\n\
         Schema: {{\"summary\": string, \"sections\": {{{section_schema}}}, \"advices\": [{{\"type\":\"solution\"|\"support\", \"text\": string}}, {{...}}, {{...}}]}}\n\
         Rules:\n\
         1) Address the user's question first: '{question}'.\n\
         2) Summary: 5-7 sentences; do NOT include [pos#] citations; write naturally; ground in cards.\n\
         3) Fill sections mapping roles({roles}) to card name/orientation and a short analysis tailored to the question.\n\
         4) Exactly 3 advices: first is type=solution and must synthesize the cards with the question; the other two are type=support. Each advice short, actionable, concrete.\n\
         5) Ground every statement in the provided card meanings; do not invent other cards.\n\
         Draft: {draft}\n\
         Return ONLY the JSON object.",
        lang = lang.as_str(),
        question = reading.question,
        roles = roles.join(", "),
    )
}

/// What a model response yielded before sanitizing.
#[derive(Debug, PartialEq)]
struct ParsedResponse {
    summary: String,
    advices: Vec<String>,
    sections: Option<BTreeMap<String, Section>>,
}

fn advice_text(v: &Value) -> String {
    match v {
        Value::Object(map) => match map.get("text") {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(other) => other.to_string(),
            None => String::new(),
        },
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Structured path: first JSON object with `summary` and three advices.
fn parse_structured(text: &str) -> Option<ParsedResponse> {
    let obj: Value = serde_json::from_str(first_json_object(text)?).ok()?;
    let summary = obj.get("summary")?;
    let summary = match summary {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    let advices: Vec<String> = obj
        .get("advices")?
        .as_array()?
        .iter()
        .take(ADVICE_COUNT)
        .map(advice_text)
        .collect();
    if summary.is_empty() || advices.len() != ADVICE_COUNT {
        return None;
    }
    let sections = obj
        .get("sections")
        .filter(|s| s.is_object())
        .and_then(|s| serde_json::from_value(s.clone()).ok());
    Some(ParsedResponse {
        summary,
        advices,
        sections,
    })
}

/// Lines starting with a bullet marker, marker stripped.
fn bullet_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| l.starts_with(['-', '*', '•']))
        .map(|l| l.trim_start_matches(['-', '*', '•']).trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

fn parse_response(text: &str, draft: &LocalParts) -> ParsedResponse {
    if let Some(parsed) = parse_structured(text) {
        return parsed;
    }
    debug!("model response was not structured JSON; using bullet heuristic");
    let bullets = bullet_lines(text);
    let advices = if bullets.len() >= ADVICE_COUNT {
        bullets.into_iter().take(ADVICE_COUNT).collect()
    } else {
        draft.advices.clone()
    };
    ParsedResponse {
        summary: text.to_string(),
        advices,
        sections: None,
    }
}

/// Generative interpretation with silent local fallback.
///
/// `generator == None` means generative mode is unavailable. Transport
/// failures, timeouts and empty responses all produce local output.
pub async fn interpret_with_llm(
    reading: &Reading,
    snapshot: &CatalogSnapshot,
    lang: Lang,
    generator: Option<&dyn TextGenerator>,
) -> Interpretation {
    let Some(generator) = generator else {
        return interpret_local(reading, snapshot, lang);
    };

    let prompt = build_interpret_prompt(reading, snapshot, lang);
    let text = match generator.generate(&prompt).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            warn!(reading_id = %reading.id, "text generator returned empty output; using local interpretation");
            return interpret_local(reading, snapshot, lang);
        }
        Err(e) => {
            warn!(reading_id = %reading.id, provider = generator.name(), error = %e, "text generation failed; using local interpretation");
            return interpret_local(reading, snapshot, lang);
        }
    };

    let draft = lines_and_advices(reading, snapshot, lang);
    let parsed = parse_response(&text, &draft);

    let names: Vec<&str> = reading.items.iter().map(|d| d.card.name.as_str()).collect();
    let sanitizer = Sanitizer::new(&names);
    Interpretation {
        id: reading.id.clone(),
        lang: lang.as_str().to_string(),
        summary: sanitizer.apply(&parsed.summary),
        positions: draft.positions,
        advices: parsed
            .advices
            .iter()
            .map(|a| sanitizer.apply(a))
            .collect(),
        llm_used: true,
        sections: parsed.sections,
    }
}

fn build_explain_prompt(reading: &Reading, snapshot: &CatalogSnapshot, lang: Lang) -> String {
    let cards: Vec<Value> = reading
        .items
        .iter()
        .map(|d| {
            json!({
                "role": lang.role_name(d.position),
                "name": d.card.name,
                "orientation": d.orientation_label(),
                "meanings": meanings_for(snapshot, d, lang.as_str()).unwrap_or_default(),
            })
        })
        .collect();
    format!(
        "You are a tarot master with 30 years of experience. Respond in language: {lang}.\n\
         For each card below, write a 2-3 sentence analysis tailored to the user's question: '{question}'.\n\
         Grounded in meanings and the role, avoid determinism. Return STRICT JSON array of strings, length={n}.\n\
         Cards: {cards}",
        lang = lang.as_str(),
        question = reading.question,
        n = cards.len(),
        cards = Value::Array(cards),
    )
}

fn parse_details(text: &str) -> Option<Vec<String>> {
    let arr: Vec<Value> = serde_json::from_str(first_json_array(text)?).ok()?;
    Some(
        arr.into_iter()
            .map(|v| match v {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
    )
}

/// One short analysis per drawn card.
///
/// The result always has exactly one entry per card, padded with empty
/// strings or truncated, because callers zip it onto the cards by index.
pub async fn explain_cards_with_llm(
    reading: &Reading,
    snapshot: &CatalogSnapshot,
    lang: Lang,
    generator: Option<&dyn TextGenerator>,
) -> Vec<String> {
    let n = reading.items.len();
    let Some(generator) = generator else {
        return vec![String::new(); n];
    };

    let prompt = build_explain_prompt(reading, snapshot, lang);
    let mut details = match generator.generate(&prompt).await {
        Ok(text) => parse_details(&text).unwrap_or_else(|| {
            warn!(reading_id = %reading.id, "card details response was not a JSON array");
            Vec::new()
        }),
        Err(e) => {
            warn!(reading_id = %reading.id, provider = generator.name(), error = %e, "card details generation failed");
            Vec::new()
        }
    };
    if details.len() != n {
        debug!(expected = n, got = details.len(), "normalizing card details length");
    }
    details.resize(n, String::new());
    details
}
