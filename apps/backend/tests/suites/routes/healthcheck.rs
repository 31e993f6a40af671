use std::sync::Arc;

use actix_web::test;
use tarot_backend::llm::TextGenerator;

use crate::common::read_ok_json;
use crate::support::fake_generator::CannedGenerator;
use crate::support::{create_test_app, memory_state, state_with_generator};

#[actix_web::test]
async fn test_health_endpoint() {
    let app = create_test_app(memory_state().await).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert!(resp.headers().get("x-request-id").is_some());

    let body = read_ok_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["generative"], false);
    assert_eq!(body["catalog"]["cards"], 78);
    assert!(body["catalog"]["etag"].as_str().unwrap().starts_with("W/\""));
    assert!(!body["app_version"].as_str().unwrap().is_empty());
}

#[actix_web::test]
async fn health_reports_generative_mode() {
    let generator = Arc::new(CannedGenerator::default()) as Arc<dyn TextGenerator>;
    let app = create_test_app(state_with_generator(Some(generator)).await)
        .build()
        .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(body["generative"], true);
}
