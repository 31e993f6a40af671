use super::meanings_for;
use super::templates::templates_for;
use crate::catalog::CatalogSnapshot;
use crate::domain::{Interpretation, Lang, Reading};

/// Spread position whose card anchors the first advice.
pub const SOLUTION_POSITION: u8 = 8;
pub const ADVICE_COUNT: usize = 3;

/// Template output shared by local mode and the generative draft.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LocalParts {
    pub positions: Vec<String>,
    pub advices: Vec<String>,
    pub summary: String,
}

pub(crate) fn lines_and_advices(
    reading: &Reading,
    snapshot: &CatalogSnapshot,
    lang: Lang,
) -> LocalParts {
    let t = templates_for(lang);
    let code = lang.as_str();

    let mut positions = Vec::with_capacity(reading.items.len());
    let mut advices = Vec::with_capacity(ADVICE_COUNT);

    for drawn in &reading.items {
        let meanings = meanings_for(snapshot, drawn, code);
        let top = meanings
            .map(|m| m.iter().take(2).cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        positions.push(format!(
            "{}. {}: {} ({}) - {}",
            drawn.position,
            lang.role_name(drawn.position),
            drawn.card.name,
            t.orientation(drawn.is_reversed),
            top
        ));
    }

    if let Some(first) = reading
        .at_position(SOLUTION_POSITION)
        .and_then(|drawn| meanings_for(snapshot, drawn, code))
        .and_then(|m| m.first())
    {
        advices.push(t.solution_advice(first));
    }

    for drawn in &reading.items {
        if advices.len() >= ADVICE_COUNT {
            break;
        }
        if let Some(first) = meanings_for(snapshot, drawn, code).and_then(|m| m.first()) {
            advices.push(t.support_advice(first));
        }
    }

    LocalParts {
        positions,
        advices,
        summary: t.summary.to_string(),
    }
}

/// Deterministic template interpretation.
pub fn interpret_local(reading: &Reading, snapshot: &CatalogSnapshot, lang: Lang) -> Interpretation {
    let parts = lines_and_advices(reading, snapshot, lang);
    Interpretation {
        id: reading.id.clone(),
        lang: lang.as_str().to_string(),
        summary: parts.summary,
        positions: parts.positions,
        advices: parts.advices,
        llm_used: false,
        sections: None,
    }
}
