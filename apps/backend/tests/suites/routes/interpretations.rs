use std::sync::Arc;

use actix_web::test;
use serde_json::{json, Value};
use tarot_backend::llm::TextGenerator;

use super::{create_reading, reading_id};
use crate::common::{assert_problem, read_ok_json};
use crate::support::fake_generator::{CannedGenerator, DownGenerator};
use crate::support::{create_test_app, memory_state, state_with_generator};

fn interpret_req(id: &str, body: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri(&format!("/api/readings/{id}/interpret"))
        .set_json(body)
        .to_request()
}

#[actix_web::test]
async fn local_interpretation_shape() {
    let app = create_test_app(memory_state().await).build().await;
    let id = reading_id(&create_reading(&app, Some(42)).await);

    let body = read_ok_json(test::call_service(&app, interpret_req(&id, json!({}))).await).await;
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["lang"], "ko");
    assert_eq!(body["llm_used"], false);
    assert!(!body["summary"].as_str().unwrap().is_empty());

    let positions = body["positions"].as_array().unwrap();
    assert_eq!(positions.len(), 8);
    assert!(positions[0].as_str().unwrap().starts_with("1. 이슈: "));
    assert!(positions[7].as_str().unwrap().starts_with("8. "));
    assert_eq!(body["advices"].as_array().unwrap().len(), 3);
    assert!(body.get("sections").is_none());
}

#[actix_web::test]
async fn repeated_interpretation_is_identical() {
    let app = create_test_app(memory_state().await).build().await;
    let id = reading_id(&create_reading(&app, Some(5)).await);

    let first = read_ok_json(test::call_service(&app, interpret_req(&id, json!({"lang": "en"}))).await).await;
    let second = read_ok_json(test::call_service(&app, interpret_req(&id, json!({"lang": "en"}))).await).await;
    assert_eq!(first, second);
    assert_eq!(first["lang"], "en");
}

#[actix_web::test]
async fn auto_language_follows_the_question() {
    let app = create_test_app(memory_state().await).build().await;
    let id = reading_id(&create_reading(&app, Some(9)).await);

    let body =
        read_ok_json(test::call_service(&app, interpret_req(&id, json!({"lang": "auto"}))).await).await;
    assert_eq!(body["lang"], "ko");
}

#[actix_web::test]
async fn generative_request_without_provider_falls_back() {
    let app = create_test_app(memory_state().await).build().await;
    let id = reading_id(&create_reading(&app, Some(11)).await);

    let body =
        read_ok_json(test::call_service(&app, interpret_req(&id, json!({"use_llm": true}))).await).await;
    assert_eq!(body["llm_used"], false);
}

#[actix_web::test]
async fn generative_interpretation_is_cached() {
    let generator = Arc::new(CannedGenerator::default());
    let state = state_with_generator(Some(generator.clone() as Arc<dyn TextGenerator>)).await;
    let app = create_test_app(state).build().await;
    let id = reading_id(&create_reading(&app, Some(42)).await);

    let body = json!({"lang": "en", "use_llm": true});
    let first = read_ok_json(test::call_service(&app, interpret_req(&id, body.clone())).await).await;
    assert_eq!(first["llm_used"], true);
    assert_eq!(first["summary"], "Steady progress is likely, call 1.");
    assert_eq!(
        first["advices"],
        json!([
            "Take one concrete step this week.",
            "Lean on a trusted colleague.",
            "Write down what went well."
        ])
    );

    let second = read_ok_json(test::call_service(&app, interpret_req(&id, body)).await).await;
    assert_eq!(first, second);
    assert_eq!(generator.calls(), 1);

    // Local mode is a separate cache entry
    let local = read_ok_json(test::call_service(&app, interpret_req(&id, json!({"lang": "en"}))).await).await;
    assert_eq!(local["llm_used"], false);
    assert_eq!(generator.calls(), 1);
}

#[actix_web::test]
async fn failing_provider_degrades_to_local() {
    let state = state_with_generator(Some(Arc::new(DownGenerator) as Arc<dyn TextGenerator>)).await;
    let app = create_test_app(state).build().await;
    let id = reading_id(&create_reading(&app, Some(3)).await);

    let body =
        read_ok_json(test::call_service(&app, interpret_req(&id, json!({"use_llm": true}))).await).await;
    assert_eq!(body["llm_used"], false);
    assert_eq!(body["positions"].as_array().unwrap().len(), 8);
}

#[actix_web::test]
async fn interpret_rejects_bad_input() {
    let app = create_test_app(memory_state().await).build().await;
    let id = reading_id(&create_reading(&app, Some(1)).await);

    let resp = test::call_service(&app, interpret_req(&id, json!({"lang": "fr"}))).await;
    assert_problem(resp, 422, "INVALID_LANGUAGE").await;

    let resp = test::call_service(&app, interpret_req(&id, json!({"style": ""}))).await;
    assert_problem(resp, 422, "VALIDATION_ERROR").await;

    let resp = test::call_service(&app, interpret_req("nonexistent-id", json!({}))).await;
    assert_problem(resp, 404, "READING_NOT_FOUND").await;
}

#[actix_web::test]
async fn local_full_result_has_context_but_no_details() {
    let app = create_test_app(memory_state().await).build().await;
    let created = create_reading(&app, Some(42)).await;
    let id = reading_id(&created);

    let req = test::TestRequest::get()
        .uri(&format!("/api/readings/{id}/result"))
        .to_request();
    let body = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["question"], created["question"]);
    assert_eq!(body["llm_used"], false);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 8);
    assert_eq!(items[0]["role"], "이슈");
    assert_eq!(items[0]["card"], created["items"][0]["card"]);
    assert!(items.iter().all(|item| item.get("llm_detail").is_none()));
    assert!(items[0]["used_meanings"].as_array().is_some());
}

#[actix_web::test]
async fn generative_full_result_attaches_card_details() {
    let generator = Arc::new(CannedGenerator::default());
    let state = state_with_generator(Some(generator.clone() as Arc<dyn TextGenerator>)).await;
    let app = create_test_app(state).build().await;
    let id = reading_id(&create_reading(&app, Some(42)).await);

    let uri = format!("/api/readings/{id}/result?lang=en&use_llm=true");
    let body = read_ok_json(test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await).await;
    assert_eq!(body["llm_used"], true);
    assert_eq!(body["lang"], "en");

    let items = body["items"].as_array().unwrap();
    assert_eq!(items[0]["llm_detail"], "detail 1 of call 2");
    assert_eq!(items[7]["llm_detail"], "detail 8 of call 2");
    assert_eq!(generator.calls(), 2);

    // Both the interpretation and the details come from cache the second time
    let again = read_ok_json(test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await).await;
    assert_eq!(again, body);
    assert_eq!(generator.calls(), 2);
}

#[actix_web::test]
async fn full_result_query_validation() {
    let app = create_test_app(memory_state().await).build().await;
    let id = reading_id(&create_reading(&app, Some(2)).await);

    let req = test::TestRequest::get()
        .uri(&format!("/api/readings/{id}/result?lang=xx"))
        .to_request();
    assert_problem(test::call_service(&app, req).await, 400, "INVALID_LANGUAGE").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/readings/{id}/result?use_llm=maybe"))
        .to_request();
    assert_problem(test::call_service(&app, req).await, 400, "BAD_REQUEST").await;
}
