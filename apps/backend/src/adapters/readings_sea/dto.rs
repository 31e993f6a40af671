//! Row <-> domain conversions for the readings_sea adapter.

use sea_orm::{DbErr, Set};
use serde_json::Value as Json;

use crate::domain::{Card, DrawnCard, GroupLabel, GroupOrder, Interpretation, Reading};
use crate::entities::{interpretations, reading_cards, readings};

fn to_json<T: serde::Serialize>(value: &T) -> Result<Json, DbErr> {
    serde_json::to_value(value).map_err(|e| DbErr::Json(e.to_string()))
}

fn from_json<T: serde::de::DeserializeOwned>(value: Json, column: &str) -> Result<T, DbErr> {
    serde_json::from_value(value).map_err(|e| DbErr::Json(format!("{column}: {e}")))
}

fn label(raw: &str) -> Result<GroupLabel, DbErr> {
    GroupLabel::parse(raw).ok_or_else(|| DbErr::Type(format!("invalid group label {raw:?}")))
}

/// Header row for a new reading.
pub fn reading_active(reading: &Reading) -> readings::ActiveModel {
    let [a, b, c] = reading.order.labels();
    readings::ActiveModel {
        id: Set(reading.id.clone()),
        question: Set(reading.question.clone()),
        ord_a: Set(a.as_str().to_string()),
        ord_b: Set(b.as_str().to_string()),
        ord_c: Set(c.as_str().to_string()),
        shuffle_times: Set(i16::from(reading.shuffle_times)),
        seed: Set(reading.seed),
        allow_reversed: Set(reading.allow_reversed),
        created_at: Set(reading.created_at),
    }
}

/// One row per drawn card, with the card snapshot denormalized.
pub fn card_actives(reading: &Reading) -> Result<Vec<reading_cards::ActiveModel>, DbErr> {
    reading
        .items
        .iter()
        .map(|item| {
            Ok(reading_cards::ActiveModel {
                reading_id: Set(reading.id.clone()),
                position: Set(i16::from(item.position)),
                is_reversed: Set(item.is_reversed),
                card_id: Set(i32::from(item.card.id)),
                card_name: Set(item.card.name.clone()),
                arcana: Set(item.card.arcana.clone()),
                suit: Set(item.card.suit.clone()),
                image_url: Set(item.card.image_url.clone()),
                upright_meaning: Set(item.card.upright_meaning.as_ref().map(to_json).transpose()?),
                reversed_meaning: Set(item
                    .card
                    .reversed_meaning
                    .as_ref()
                    .map(to_json)
                    .transpose()?),
            })
        })
        .collect()
}

fn drawn_from_row(row: reading_cards::Model) -> Result<DrawnCard, DbErr> {
    let position = u8::try_from(row.position)
        .map_err(|_| DbErr::Type(format!("position out of range: {}", row.position)))?;
    let id = u8::try_from(row.card_id)
        .map_err(|_| DbErr::Type(format!("card id out of range: {}", row.card_id)))?;
    Ok(DrawnCard {
        position,
        is_reversed: row.is_reversed,
        card: Card {
            id,
            name: row.card_name,
            arcana: row.arcana,
            suit: row.suit,
            image_url: row.image_url,
            upright_meaning: row
                .upright_meaning
                .map(|v| from_json(v, "upright_meaning"))
                .transpose()?,
            reversed_meaning: row
                .reversed_meaning
                .map(|v| from_json(v, "reversed_meaning"))
                .transpose()?,
        },
    })
}

/// Reassemble a reading from its header and card rows (rows in position order).
pub fn reading_from_rows(
    header: readings::Model,
    cards: Vec<reading_cards::Model>,
) -> Result<Reading, DbErr> {
    let order = GroupOrder::new(&[
        label(&header.ord_a)?,
        label(&header.ord_b)?,
        label(&header.ord_c)?,
    ])
    .map_err(|e| DbErr::Type(e.to_string()))?;
    let shuffle_times = u8::try_from(header.shuffle_times)
        .map_err(|_| DbErr::Type(format!("shuffle_times out of range: {}", header.shuffle_times)))?;
    let items = cards
        .into_iter()
        .map(drawn_from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Reading {
        id: header.id,
        question: header.question,
        order,
        shuffle_times,
        seed: header.seed,
        allow_reversed: header.allow_reversed,
        items,
        created_at: header.created_at,
    })
}

/// Column values for an interpretation row, minus the key and timestamp.
pub struct InterpretationColumns {
    pub summary: String,
    pub positions: Json,
    pub advices: Json,
    pub llm_used: bool,
    pub sections: Option<Json>,
}

impl InterpretationColumns {
    pub fn from_domain(interpretation: &Interpretation) -> Result<Self, DbErr> {
        Ok(Self {
            summary: interpretation.summary.clone(),
            positions: to_json(&interpretation.positions)?,
            advices: to_json(&interpretation.advices)?,
            llm_used: interpretation.llm_used,
            sections: interpretation.sections.as_ref().map(to_json).transpose()?,
        })
    }
}

pub fn interpretation_from_row(row: interpretations::Model) -> Result<Interpretation, DbErr> {
    Ok(Interpretation {
        id: row.reading_id,
        lang: row.lang,
        summary: row.summary,
        positions: from_json(row.positions, "positions")?,
        advices: from_json(row.advices, "advices")?,
        llm_used: row.llm_used,
        sections: row.sections.map(|v| from_json(v, "sections")).transpose()?,
    })
}

pub fn details_to_json(details: &[String]) -> Result<Json, DbErr> {
    to_json(&details)
}

pub fn details_from_json(value: Json) -> Result<Vec<String>, DbErr> {
    from_json(value, "details")
}
