use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::cards::Card;
use crate::domain::dealing::GroupOrder;
use crate::errors::domain::{DomainError, ValidationKind};

pub const QUESTION_MAX_CHARS: usize = 500;

/// One dealt card. Position is 1-based in draw order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnCard {
    pub position: u8,
    pub is_reversed: bool,
    pub card: Card,
}

impl DrawnCard {
    pub fn orientation_label(&self) -> &'static str {
        if self.is_reversed {
            "reversed"
        } else {
            "upright"
        }
    }
}

/// A drawn reading before the store assigns it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReading {
    pub question: String,
    pub order: GroupOrder,
    pub shuffle_times: u8,
    pub seed: Option<i64>,
    pub allow_reversed: bool,
    pub items: Vec<DrawnCard>,
}

impl NewReading {
    pub fn into_reading(self, id: String, created_at: OffsetDateTime) -> Reading {
        Reading {
            id,
            question: self.question,
            order: self.order,
            shuffle_times: self.shuffle_times,
            seed: self.seed,
            allow_reversed: self.allow_reversed,
            items: self.items,
            created_at,
        }
    }
}

/// A stored reading. Append-only: never mutated after `create`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub id: String,
    pub question: String,
    pub order: GroupOrder,
    pub shuffle_times: u8,
    pub seed: Option<i64>,
    pub allow_reversed: bool,
    pub items: Vec<DrawnCard>,
    pub created_at: OffsetDateTime,
}

impl Reading {
    /// Card occupying a 1-based spread position.
    pub fn at_position(&self, position: u8) -> Option<&DrawnCard> {
        self.items.iter().find(|d| d.position == position)
    }
}

/// Questions are 1..=500 characters (not bytes).
pub fn validate_question(question: &str) -> Result<(), DomainError> {
    let len = question.chars().count();
    if len == 0 || len > QUESTION_MAX_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidQuestion,
            format!("question must be 1..={QUESTION_MAX_CHARS} characters, got {len}"),
        ));
    }
    Ok(())
}
