use actix_web::test;
use time::OffsetDateTime;

use crate::common::{assert_problem, read_ok_json};
use crate::support::{create_test_app, memory_state};

#[actix_web::test]
async fn seeded_daily_card_is_reproducible() {
    let app = create_test_app(memory_state().await).build().await;
    let uri = "/api/daily?lang=en&seed=7";

    let first = read_ok_json(test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await).await;
    let second = read_ok_json(test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await).await;

    assert_eq!(first["card"]["card"]["id"], second["card"]["card"]["id"]);
    assert_eq!(first["card"]["is_reversed"], second["card"]["is_reversed"]);
    assert_eq!(first["lang"], "en");
    assert_eq!(first["card"]["position"], 1);
    assert_eq!(first["llm_used"], false);
    assert!(!first["summary"].as_str().unwrap().is_empty());

    // UTC calendar date; the two may differ only across midnight
    let today = OffsetDateTime::now_utc().date();
    let date = first["date"].as_str().unwrap();
    assert!(
        date == today.to_string() || Some(date.to_string()) == today.previous_day().map(|d| d.to_string()),
        "unexpected daily date {date}"
    );
}

#[actix_web::test]
async fn daily_defaults_to_korean() {
    let app = create_test_app(memory_state().await).build().await;

    let body = read_ok_json(test::call_service(&app, test::TestRequest::get().uri("/api/daily").to_request()).await).await;
    assert_eq!(body["lang"], "ko");
    let id = body["card"]["card"]["id"].as_u64().unwrap();
    assert!(id < 78);

    let body = read_ok_json(
        test::call_service(&app, test::TestRequest::get().uri("/api/daily?lang=auto&seed=1").to_request()).await,
    )
    .await;
    assert_eq!(body["lang"], "ko");
}

#[actix_web::test]
async fn daily_rejects_bad_query() {
    let app = create_test_app(memory_state().await).build().await;

    let req = test::TestRequest::get().uri("/api/daily?lang=xx").to_request();
    assert_problem(test::call_service(&app, req).await, 400, "INVALID_LANGUAGE").await;

    let req = test::TestRequest::get().uri("/api/daily?seed=abc").to_request();
    assert_problem(test::call_service(&app, req).await, 400, "BAD_REQUEST").await;
}
