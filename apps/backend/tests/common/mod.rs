#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use backend_test_support::problem_details::{assert_problem_details, ProblemDetailsLike};
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Consume an error response and check it against the problem-details contract.
pub async fn assert_problem(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
) -> ProblemDetailsLike {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    let expected = actix_web::http::StatusCode::from_u16(expected_status)
        .expect("expected status should be a valid HTTP status");
    assert_problem_details(status, &headers, &body, expected, expected_code)
}

/// Read a successful response as JSON, failing loudly on any other status.
pub async fn read_ok_json(resp: ServiceResponse<BoxBody>) -> Value {
    let status = resp.status();
    let body = test::read_body(resp).await;
    assert!(
        status.is_success(),
        "expected success, got {status}: {}",
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("response body should be JSON")
}

// Proptest configuration shared by property suites.
//
// Env knobs:
// - PROPTEST_CASES: number of cases per property (default 16).
// - PROPTEST_MAX_SHRINK_MS: optional cap for shrinking time in milliseconds.
pub fn proptest_config() -> proptest::prelude::ProptestConfig {
    let base = proptest::prelude::ProptestConfig::default();

    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(16)
        .max(1);

    let max_shrink_time = std::env::var("PROPTEST_MAX_SHRINK_MS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(base.max_shrink_time);

    proptest::prelude::ProptestConfig {
        // Disable persistence to silence regression-file warnings in integration tests
        failure_persistence: None,
        cases,
        max_shrink_time,
        ..base
    }
}
