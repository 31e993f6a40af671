//! Shuffle and draw engine.
//!
//! The deck is cut into three contiguous groups, restacked in the caller's
//! group order, shuffled `shuffle_times` times and dealt from the top. One
//! RNG stream drives every shuffle pass and every orientation flip, so a
//! seeded draw is reproducible end to end.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::domain::cards::Card;
use crate::domain::reading::DrawnCard;
use crate::errors::domain::{DomainError, ValidationKind};

pub const GROUP_COUNT: usize = 3;
pub const DRAW_COUNT: usize = 8;
pub const MIN_SHUFFLE_TIMES: u8 = 1;
pub const MAX_SHUFFLE_TIMES: u8 = 50;
const REVERSED_PROBABILITY: f64 = 0.5;
/// Positions are `u8`, so one spread holds at most this many cards.
pub const MAX_SPREAD_SIZE: usize = u8::MAX as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupLabel {
    A,
    B,
    C,
}

impl GroupLabel {
    fn index(self) -> usize {
        match self {
            GroupLabel::A => 0,
            GroupLabel::B => 1,
            GroupLabel::C => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            GroupLabel::A => "A",
            GroupLabel::B => "B",
            GroupLabel::C => "C",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(GroupLabel::A),
            "B" => Some(GroupLabel::B),
            "C" => Some(GroupLabel::C),
            _ => None,
        }
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A permutation of the three group labels.
///
/// Only constructible through validation, so holding one proves each label
/// appears exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GroupLabel>", into = "Vec<GroupLabel>")]
pub struct GroupOrder([GroupLabel; GROUP_COUNT]);

impl GroupOrder {
    pub const ABC: GroupOrder = GroupOrder([GroupLabel::A, GroupLabel::B, GroupLabel::C]);

    pub fn new(labels: &[GroupLabel]) -> Result<Self, DomainError> {
        let invalid = || {
            DomainError::validation(
                ValidationKind::InvalidGroupOrder,
                format!(
                    "group_order must contain A, B and C exactly once; got [{}]",
                    labels
                        .iter()
                        .map(|l| l.as_str())
                        .collect::<Vec<_>>()
                        .join(",")
                ),
            )
        };

        let [a, b, c] = <[GroupLabel; GROUP_COUNT]>::try_from(labels).map_err(|_| invalid())?;
        if a == b || b == c || a == c {
            return Err(invalid());
        }
        Ok(GroupOrder([a, b, c]))
    }

    pub fn labels(&self) -> [GroupLabel; GROUP_COUNT] {
        self.0
    }
}

impl TryFrom<Vec<GroupLabel>> for GroupOrder {
    type Error = DomainError;

    fn try_from(v: Vec<GroupLabel>) -> Result<Self, Self::Error> {
        GroupOrder::new(&v)
    }
}

impl From<GroupOrder> for Vec<GroupLabel> {
    fn from(order: GroupOrder) -> Self {
        order.0.to_vec()
    }
}

/// Build the engine's RNG.
///
/// An explicit seed gives a reproducible stream; the i64 is reinterpreted
/// bit-for-bit so negative seeds are valid and distinct. Without a seed the
/// stream is seeded from the OS.
pub fn rng_for_seed(seed: Option<i64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s as u64),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    }
}

/// Cut `cards` into three contiguous groups.
///
/// The first two groups hold `n / 3` cards each and the third holds the rest.
pub fn split_into_three_groups<T>(cards: &[T]) -> Result<[&[T]; GROUP_COUNT], DomainError> {
    if cards.len() < GROUP_COUNT {
        return Err(DomainError::validation(
            ValidationKind::InsufficientCards,
            format!("need at least {GROUP_COUNT} cards to split, got {}", cards.len()),
        ));
    }
    let size = cards.len() / GROUP_COUNT;
    let (a, rest) = cards.split_at(size);
    let (b, c) = rest.split_at(size);
    Ok([a, b, c])
}

/// Concatenate the groups in the requested order.
pub fn merge_by_order<T: Clone>(groups: [&[T]; GROUP_COUNT], order: GroupOrder) -> Vec<T> {
    let total = groups.iter().map(|g| g.len()).sum();
    let mut merged = Vec::with_capacity(total);
    for label in order.labels() {
        merged.extend_from_slice(groups[label.index()]);
    }
    merged
}

/// Fisher-Yates: for i from the last index down to 1, swap i with a uniform j in [0, i].
fn fisher_yates<T, R: Rng>(cards: &mut [T], rng: &mut R) {
    for i in (1..cards.len()).rev() {
        let j = rng.random_range(0..=i);
        cards.swap(i, j);
    }
}

/// Apply `times` shuffle passes, all drawing from the same `rng`.
pub fn shuffle_n_times<T, R: Rng>(cards: &mut [T], times: u8, rng: &mut R) {
    for _ in 0..times {
        fisher_yates(cards, rng);
    }
}

/// Deal the top `count` cards, flipping each independently when reversals are allowed.
pub fn draw<R: Rng>(
    cards: &[Card],
    count: usize,
    allow_reversed: bool,
    rng: &mut R,
) -> Result<Vec<DrawnCard>, DomainError> {
    if count > MAX_SPREAD_SIZE {
        return Err(DomainError::validation(
            ValidationKind::InsufficientCards,
            format!("a spread holds at most {MAX_SPREAD_SIZE} cards, asked for {count}"),
        ));
    }
    if cards.len() < count {
        return Err(insufficient(cards.len(), count));
    }
    Ok(cards
        .iter()
        .take(count)
        .zip(1..=u8::MAX)
        .map(|(card, position)| DrawnCard {
            position,
            is_reversed: allow_reversed && rng.random::<f64>() < REVERSED_PROBABILITY,
            card: card.clone(),
        })
        .collect())
}

/// Full pipeline for a spread of `count` cards: split, restack, shuffle, draw.
pub fn draw_spread(
    cards: &[Card],
    order: GroupOrder,
    shuffle_times: u8,
    seed: Option<i64>,
    allow_reversed: bool,
    count: usize,
) -> Result<Vec<DrawnCard>, DomainError> {
    if cards.len() < count {
        return Err(insufficient(cards.len(), count));
    }
    if !(MIN_SHUFFLE_TIMES..=MAX_SHUFFLE_TIMES).contains(&shuffle_times) {
        return Err(DomainError::validation(
            ValidationKind::InvalidShuffleTimes,
            format!(
                "shuffle_times must be {MIN_SHUFFLE_TIMES}..={MAX_SHUFFLE_TIMES}, got {shuffle_times}"
            ),
        ));
    }

    let mut rng = rng_for_seed(seed);
    let groups = split_into_three_groups(cards)?;
    let mut deck = merge_by_order(groups, order);
    shuffle_n_times(&mut deck, shuffle_times, &mut rng);
    draw(&deck, count, allow_reversed, &mut rng)
}

/// Draw the standard 8-card spread.
pub fn create_reading(
    cards: &[Card],
    order: GroupOrder,
    shuffle_times: u8,
    seed: Option<i64>,
    allow_reversed: bool,
) -> Result<Vec<DrawnCard>, DomainError> {
    draw_spread(cards, order, shuffle_times, seed, allow_reversed, DRAW_COUNT)
}

fn insufficient(have: usize, need: usize) -> DomainError {
    DomainError::validation(
        ValidationKind::InsufficientCards,
        format!("deck has {have} cards, need at least {need}"),
    )
}
