use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tarot_backend::catalog::DeckCatalog;
use tarot_backend::domain::dealing::create_reading;
use tarot_backend::domain::{GroupOrder, Interpretation, NewReading, Section};
use tarot_backend::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use tarot_backend::infra::db::connect_and_migrate;
use tarot_backend::repos::{DetailsKey, InterpretationKey, ReadingStore, SeaReadingStore};
use tarot_backend::utils::share_slug::SlugGenerator;

use crate::support::deck_sources;

async fn sqlite_store() -> SeaReadingStore {
    let conn = connect_and_migrate("sqlite::memory:")
        .await
        .expect("in-memory sqlite should connect and migrate");
    SeaReadingStore::new(conn)
}

async fn sqlite_store_with_slugs(slugs: SlugGenerator) -> SeaReadingStore {
    let conn = connect_and_migrate("sqlite::memory:")
        .await
        .expect("in-memory sqlite should connect and migrate");
    SeaReadingStore::with_slug_generator(conn, slugs)
}

fn new_reading(seed: i64) -> NewReading {
    let cards = DeckCatalog::new(deck_sources())
        .cards()
        .expect("bundled deck should load");
    let items = create_reading(&cards, GroupOrder::ABC, 3, Some(seed), true)
        .expect("bundled deck should deal a spread");
    NewReading {
        question: "올해 이직 운은?".to_string(),
        order: GroupOrder::ABC,
        shuffle_times: 3,
        seed: Some(seed),
        allow_reversed: true,
        items,
    }
}

fn interpretation(id: &str, summary: &str) -> Interpretation {
    Interpretation {
        id: id.to_string(),
        lang: "ko".to_string(),
        summary: summary.to_string(),
        positions: vec!["1. 이슈: The Fool (정) - 새로운 시작".to_string()],
        advices: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        llm_used: false,
        sections: None,
    }
}

/// Slugs from a fixed script, then unique fallbacks.
fn scripted_slugs(script: &'static [&'static str]) -> (SlugGenerator, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let generator: SlugGenerator = Arc::new(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        script
            .get(n)
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("fresh-{n}"))
    });
    (generator, calls)
}

#[tokio::test]
async fn reading_round_trips_through_sqlite() {
    let store = sqlite_store().await;
    assert_eq!(store.backend_name(), "sqlite");

    let draft = new_reading(42);
    let created = store.create(draft.clone()).await.unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.items, draft.items);

    let loaded = store.get(&created.id).await.unwrap().expect("reading stored");
    assert_eq!(loaded.id, created.id);
    assert_eq!(loaded.question, draft.question);
    assert_eq!(loaded.order, GroupOrder::ABC);
    assert_eq!(loaded.seed, Some(42));
    assert_eq!(loaded.items, draft.items);
    assert_eq!(
        loaded.created_at.unix_timestamp(),
        created.created_at.unix_timestamp()
    );

    assert!(store.get("nonexistent-id").await.unwrap().is_none());
}

#[tokio::test]
async fn readings_get_distinct_ids() {
    let store = sqlite_store().await;
    let a = store.create(new_reading(1)).await.unwrap();
    let b = store.create(new_reading(1)).await.unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(a.items, b.items);
}

#[tokio::test]
async fn interpretation_cache_upserts() {
    let store = sqlite_store().await;
    let reading = store.create(new_reading(7)).await.unwrap();
    let key = InterpretationKey::new(&reading.id, "ko", "concise", false);

    assert!(store.get_interpretation(&key).await.unwrap().is_none());

    store
        .save_interpretation(&key, &interpretation(&reading.id, "first"))
        .await
        .unwrap();
    let mut second = interpretation(&reading.id, "second");
    second.llm_used = true;
    second.sections = Some(BTreeMap::from([(
        "Issue".to_string(),
        Section {
            card: "The Fool".to_string(),
            orientation: "upright".to_string(),
            analysis: "fresh start".to_string(),
        },
    )]));
    store.save_interpretation(&key, &second).await.unwrap();

    let cached = store.get_interpretation(&key).await.unwrap().unwrap();
    assert_eq!(cached, second);

    // Other keys are independent
    let other = InterpretationKey::new(&reading.id, "en", "concise", false);
    assert!(store.get_interpretation(&other).await.unwrap().is_none());
}

#[tokio::test]
async fn details_cache_upserts() {
    let store = sqlite_store().await;
    let reading = store.create(new_reading(8)).await.unwrap();
    let key = DetailsKey::new(&reading.id, "en", true);

    assert!(store.get_details(&key).await.unwrap().is_none());
    store
        .save_details(&key, &["one".to_string(), "two".to_string()])
        .await
        .unwrap();
    store.save_details(&key, &["three".to_string()]).await.unwrap();
    assert_eq!(
        store.get_details(&key).await.unwrap(),
        Some(vec!["three".to_string()])
    );
    assert!(store
        .get_details(&DetailsKey::new(&reading.id, "en", false))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn share_slug_is_idempotent_and_resolves() {
    let store = sqlite_store().await;
    let reading = store.create(new_reading(9)).await.unwrap();

    let slug = store.create_share_slug(&reading.id).await.unwrap();
    assert_eq!(store.create_share_slug(&reading.id).await.unwrap(), slug);
    assert_eq!(
        store.resolve_share_slug(&slug).await.unwrap(),
        Some(reading.id.clone())
    );
    assert!(store.resolve_share_slug("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn share_slug_collision_retries() {
    let (slugs, calls) = scripted_slugs(&["taken", "taken", "taken"]);
    let store = sqlite_store_with_slugs(slugs).await;
    let first = store.create(new_reading(1)).await.unwrap();
    let second = store.create(new_reading(2)).await.unwrap();

    assert_eq!(store.create_share_slug(&first.id).await.unwrap(), "taken");
    assert_eq!(store.create_share_slug(&second.id).await.unwrap(), "fresh-3");
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(
        store.resolve_share_slug("taken").await.unwrap(),
        Some(first.id)
    );
}

#[tokio::test]
async fn share_slug_gives_up_after_repeated_collisions() {
    let slugs: SlugGenerator = Arc::new(|| "always".to_string());
    let store = sqlite_store_with_slugs(slugs).await;
    let first = store.create(new_reading(1)).await.unwrap();
    let second = store.create(new_reading(2)).await.unwrap();

    store.create_share_slug(&first.id).await.unwrap();
    let err = store.create_share_slug(&second.id).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::ShareSlugExhausted, _)
    ));
}

#[tokio::test]
async fn share_slug_for_unknown_reading_is_not_found() {
    let store = sqlite_store().await;
    let err = store.create_share_slug("nonexistent-id").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Reading, _)));
}
