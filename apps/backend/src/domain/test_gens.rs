//! Shared fixtures and proptest strategies for domain tests.

use proptest::prelude::*;

use crate::domain::cards::Card;
use crate::domain::dealing::{GroupLabel, GroupOrder};

/// A deck of `n` synthetic cards with ids 0..n and two meanings per orientation.
pub fn sample_deck(n: usize) -> Vec<Card> {
    (0..n)
        .map(|i| Card {
            id: i as u8,
            name: format!("Card {i}"),
            arcana: if i < 22 { "Major" } else { "Minor" }.to_string(),
            suit: None,
            image_url: None,
            upright_meaning: Some(vec![format!("up{i}-a"), format!("up{i}-b")]),
            reversed_meaning: Some(vec![format!("rev{i}-a"), format!("rev{i}-b")]),
        })
        .collect()
}

pub fn group_order() -> impl Strategy<Value = GroupOrder> {
    Just(vec![GroupLabel::A, GroupLabel::B, GroupLabel::C])
        .prop_shuffle()
        .prop_map(|labels| GroupOrder::new(&labels).expect("shuffled labels form a permutation"))
}

pub fn shuffle_times() -> impl Strategy<Value = u8> {
    1u8..=50
}
