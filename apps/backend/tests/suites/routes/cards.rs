use actix_web::http::header::{CACHE_CONTROL, ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::test;

use crate::common::{assert_problem, read_ok_json};
use crate::support::{create_test_app, memory_state};

#[actix_web::test]
async fn list_returns_full_deck_with_etag() {
    let app = create_test_app(memory_state().await).build().await;

    let req = test::TestRequest::get().uri("/api/cards").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let etag = resp
        .headers()
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .expect("cards list should carry an ETag")
        .to_string();
    assert!(etag.starts_with("W/\""), "weak etag expected, got {etag}");
    assert!(resp.headers().get(CACHE_CONTROL).is_some());

    let body = read_ok_json(resp).await;
    assert_eq!(body["total"], 78);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 78);
    assert_eq!(items[0]["name"], "The Fool");
    assert_eq!(items[77]["name"], "King of Pentacles");
}

#[actix_web::test]
async fn matching_if_none_match_is_not_modified() {
    let app = create_test_app(memory_state().await).build().await;

    let first = test::call_service(&app, test::TestRequest::get().uri("/api/cards").to_request()).await;
    let etag = first.headers().get(ETAG).unwrap().to_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/cards")
        .insert_header((IF_NONE_MATCH, etag.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(resp.headers().get(ETAG).unwrap().to_str().unwrap(), etag);
    let body = test::read_body(resp).await;
    assert!(body.is_empty());

    let req = test::TestRequest::get()
        .uri("/api/cards")
        .insert_header((IF_NONE_MATCH, "W/\"something-else\""))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn single_card_lookup() {
    let app = create_test_app(memory_state().await).build().await;

    let req = test::TestRequest::get().uri("/api/cards/16").to_request();
    let body = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(body["id"], 16);
    assert_eq!(body["name"], "The Tower");
    assert_eq!(body["arcana"], "Major");

    let req = test::TestRequest::get().uri("/api/cards/22").to_request();
    let body = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(body["name"], "Ace of Wands");
    assert_eq!(body["suit"], "Wands");
}

#[actix_web::test]
async fn unknown_and_malformed_card_ids() {
    let app = create_test_app(memory_state().await).build().await;

    let req = test::TestRequest::get().uri("/api/cards/78").to_request();
    assert_problem(test::call_service(&app, req).await, 404, "CARD_NOT_FOUND").await;

    let req = test::TestRequest::get().uri("/api/cards/-1").to_request();
    assert_problem(test::call_service(&app, req).await, 404, "CARD_NOT_FOUND").await;

    let req = test::TestRequest::get().uri("/api/cards/fool").to_request();
    assert_problem(test::call_service(&app, req).await, 400, "INVALID_CARD_ID").await;
}

#[actix_web::test]
async fn meanings_follow_language_fallback() {
    let app = create_test_app(memory_state().await).build().await;

    // Korean is the default table
    let req = test::TestRequest::get().uri("/api/cards/0/meanings").to_request();
    let body = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(body["lang"], "ko");
    assert_eq!(body["upright"][0], "새로운 시작");
    assert_eq!(body["reversed"][0], "무모함");

    let req = test::TestRequest::get()
        .uri("/api/cards/0/meanings?lang=en")
        .to_request();
    let body = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(body["upright"][0], "new beginnings");

    // No Japanese table is bundled: English comes next in the chain
    let req = test::TestRequest::get()
        .uri("/api/cards/0/meanings?lang=ja")
        .to_request();
    let body = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(body["lang"], "ja");
    assert_eq!(body["upright"][0], "new beginnings");
}
