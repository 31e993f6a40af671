use actix_web::test;

use super::{create_reading, reading_id};
use crate::common::{assert_problem, read_ok_json};
use crate::support::{create_test_app, memory_state};

#[actix_web::test]
async fn share_slug_is_stable_and_resolves() {
    let app = create_test_app(memory_state().await).build().await;
    let created = create_reading(&app, Some(42)).await;
    let id = reading_id(&created);
    let uri = format!("/api/readings/{id}/share");

    let first = read_ok_json(test::call_service(&app, test::TestRequest::post().uri(&uri).to_request()).await).await;
    let second = read_ok_json(test::call_service(&app, test::TestRequest::post().uri(&uri).to_request()).await).await;
    assert_eq!(first["reading_id"], id.as_str());
    assert_eq!(first["slug"], second["slug"]);

    let slug = first["slug"].as_str().unwrap();
    assert!(!slug.is_empty());
    assert!(slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));

    let req = test::TestRequest::get()
        .uri(&format!("/api/share/{slug}"))
        .to_request();
    let shared = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(shared["slug"], slug);
    assert_eq!(shared["reading"]["id"], id.as_str());
    assert_eq!(shared["reading"]["items"], created["items"]);
}

#[actix_web::test]
async fn unknown_slug_and_reading() {
    let app = create_test_app(memory_state().await).build().await;

    let req = test::TestRequest::get().uri("/api/share/no-such-slug").to_request();
    assert_problem(test::call_service(&app, req).await, 404, "SHARE_SLUG_NOT_FOUND").await;

    let req = test::TestRequest::post()
        .uri("/api/readings/nonexistent-id/share")
        .to_request();
    assert_problem(test::call_service(&app, req).await, 404, "READING_NOT_FOUND").await;
}
