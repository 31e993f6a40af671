use std::collections::HashSet;

use proptest::prelude::*;
use tarot_backend::catalog::{CatalogSnapshot, DeckCatalog};
use tarot_backend::domain::dealing::create_reading;
use tarot_backend::domain::{detect_lang, GroupLabel, GroupOrder, Lang, Reading};
use tarot_backend::interpret::interpret_local;
use time::OffsetDateTime;

use crate::common::proptest_config;
use crate::support::deck_sources;

fn bundled_snapshot() -> std::sync::Arc<CatalogSnapshot> {
    DeckCatalog::new(deck_sources())
        .load()
        .expect("bundled deck should load")
}

fn group_order() -> impl Strategy<Value = GroupOrder> {
    Just(vec![GroupLabel::A, GroupLabel::B, GroupLabel::C])
        .prop_shuffle()
        .prop_map(|labels| GroupOrder::new(&labels).expect("a permutation is a valid order"))
}

fn lang() -> impl Strategy<Value = Lang> {
    prop_oneof![Just(Lang::Ko), Just(Lang::En), Just(Lang::Ja), Just(Lang::Zh)]
}

fn reading(snapshot: &CatalogSnapshot, order: GroupOrder, times: u8, seed: i64) -> Reading {
    Reading {
        id: format!("prop-{seed}"),
        question: "How will the new job go?".to_string(),
        order,
        shuffle_times: times,
        seed: Some(seed),
        allow_reversed: true,
        items: create_reading(snapshot.cards(), order, times, Some(seed), true)
            .expect("bundled deck should deal a spread"),
        created_at: OffsetDateTime::UNIX_EPOCH,
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Property: the bundled deck always deals 8 distinct known cards.
    #[test]
    fn prop_bundled_deck_deals_distinct_cards(
        order in group_order(),
        times in 1u8..=50,
        seed in any::<i64>(),
    ) {
        let snapshot = bundled_snapshot();
        let drawn = create_reading(snapshot.cards(), order, times, Some(seed), true).unwrap();
        let ids: HashSet<u8> = drawn.iter().map(|d| d.card.id).collect();
        prop_assert_eq!(ids.len(), 8);
        prop_assert!(ids.iter().all(|id| snapshot.card(*id).is_some()));
    }

    /// Property: local interpretations are deterministic with one line per card and three advices.
    #[test]
    fn prop_local_interpretation_is_stable(
        order in group_order(),
        times in 1u8..=10,
        seed in any::<i64>(),
        lang in lang(),
    ) {
        let snapshot = bundled_snapshot();
        let reading = reading(&snapshot, order, times, seed);

        let first = interpret_local(&reading, &snapshot, lang);
        let second = interpret_local(&reading, &snapshot, lang);
        prop_assert_eq!(&first, &second);
        prop_assert!(!first.llm_used);
        prop_assert_eq!(first.lang.as_str(), lang.as_str());
        prop_assert_eq!(first.positions.len(), 8);
        prop_assert_eq!(first.advices.len(), 3);
        for (line, drawn) in first.positions.iter().zip(&reading.items) {
            let prefix = format!("{}. ", drawn.position);
            prop_assert!(line.starts_with(&prefix));
            prop_assert!(line.contains(&drawn.card.name));
        }
    }

    /// Property: pure Hangul questions are Korean, pure ASCII letters are English.
    #[test]
    fn prop_detect_lang_by_script(
        hangul in "[가-힣]{1,20}",
        latin in "[a-zA-Z]{1,20}",
    ) {
        prop_assert_eq!(detect_lang(&hangul), Lang::Ko);
        prop_assert_eq!(detect_lang(&latin), Lang::En);
    }
}
