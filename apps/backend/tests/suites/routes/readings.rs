use std::collections::HashSet;

use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use super::{create_reading, reading_id, KO_QUESTION};
use crate::common::{assert_problem, read_ok_json};
use crate::support::{create_test_app, memory_state};

fn card_ids(view: &Value) -> Vec<u64> {
    view["items"]
        .as_array()
        .expect("items should be an array")
        .iter()
        .map(|item| item["card"]["id"].as_u64().unwrap())
        .collect()
}

fn orientations(view: &Value) -> Vec<bool> {
    view["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["is_reversed"].as_bool().unwrap())
        .collect()
}

#[actix_web::test]
async fn create_reading_deals_eight_distinct_cards() {
    let app = create_test_app(memory_state().await).build().await;

    let view = create_reading(&app, Some(42)).await;
    assert_eq!(view["question"], KO_QUESTION);
    assert_eq!(view["order"], json!(["A", "B", "C"]));
    assert_eq!(view["count"], 8);

    let ids = card_ids(&view);
    assert_eq!(ids.len(), 8);
    assert!(ids.iter().all(|&id| id < 78));
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 8);

    let positions: Vec<u64> = view["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["position"].as_u64().unwrap())
        .collect();
    assert_eq!(positions, (1..=8).collect::<Vec<u64>>());
    assert!(!reading_id(&view).is_empty());
}

#[actix_web::test]
async fn same_seed_reproduces_the_spread() {
    let app = create_test_app(memory_state().await).build().await;

    let first = create_reading(&app, Some(42)).await;
    let second = create_reading(&app, Some(42)).await;

    assert_ne!(reading_id(&first), reading_id(&second));
    assert_eq!(card_ids(&first), card_ids(&second));
    assert_eq!(orientations(&first), orientations(&second));
}

#[actix_web::test]
async fn reversal_can_be_disabled() {
    let app = create_test_app(memory_state().await).build().await;

    for seed in [1, 2, 3] {
        let req = test::TestRequest::post()
            .uri("/api/readings")
            .set_json(json!({
                "question": "Will the move go well?",
                "group_order": ["C", "A", "B"],
                "seed": seed,
                "allow_reversed": false,
            }))
            .to_request();
        let view = read_ok_json(test::call_service(&app, req).await).await;
        assert!(orientations(&view).iter().all(|r| !r));
        assert_eq!(view["order"], json!(["C", "A", "B"]));
    }
}

#[actix_web::test]
async fn stored_reading_round_trips() {
    let app = create_test_app(memory_state().await).build().await;

    let created = create_reading(&app, Some(7)).await;
    let id = reading_id(&created);

    let req = test::TestRequest::get()
        .uri(&format!("/api/readings/{id}"))
        .to_request();
    let fetched = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["items"], created["items"]);
    assert_eq!(fetched["created_at"], created["created_at"]);
}

#[actix_web::test]
async fn unknown_reading_is_not_found() {
    let app = create_test_app(memory_state().await).build().await;

    let req = test::TestRequest::get()
        .uri("/api/readings/nonexistent-id")
        .to_request();
    let problem = assert_problem(test::call_service(&app, req).await, 404, "READING_NOT_FOUND").await;
    assert!(problem.detail.contains("nonexistent-id"));
}

#[actix_web::test]
async fn malformed_reading_id_is_bad_request() {
    let app = create_test_app(memory_state().await).build().await;

    let req = test::TestRequest::get().uri("/api/readings/bad.id").to_request();
    assert_problem(test::call_service(&app, req).await, 400, "INVALID_READING_ID").await;
}

#[actix_web::test]
async fn field_violations_are_unprocessable() {
    let app = create_test_app(memory_state().await).build().await;

    let cases = [
        (
            json!({"question": "", "group_order": ["A", "B", "C"]}),
            "INVALID_QUESTION",
        ),
        (
            json!({"question": "q", "group_order": ["A", "B", "C"], "shuffle_times": 0}),
            "INVALID_SHUFFLE_TIMES",
        ),
        (
            json!({"question": "q", "group_order": ["A", "B", "C"], "shuffle_times": 51}),
            "INVALID_SHUFFLE_TIMES",
        ),
        (
            json!({"question": "q", "group_order": ["A", "A", "B"]}),
            "VALIDATION_ERROR",
        ),
        (json!({"question": "q"}), "VALIDATION_ERROR"),
        (
            json!({"question": "x".repeat(501), "group_order": ["A", "B", "C"]}),
            "INVALID_QUESTION",
        ),
    ];

    for (body, code) in cases {
        let req = test::TestRequest::post()
            .uri("/api/readings")
            .set_json(body)
            .to_request();
        assert_problem(test::call_service(&app, req).await, 422, code).await;
    }
}

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let app = create_test_app(memory_state().await).build().await;

    let req = test::TestRequest::post()
        .uri("/api/readings")
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload("{\"question\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_problem(resp, 400, "BAD_REQUEST").await;
}
