pub mod cards;
pub mod daily;
pub mod healthcheck;
pub mod interpretations;
pub mod readings;
pub mod share;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use serde_json::{json, Value};

use crate::common::read_ok_json;

pub const KO_QUESTION: &str = "올해 이직 운은?";

/// POST a reading and return its JSON view.
pub async fn create_reading<S>(app: &S, seed: Option<i64>) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/readings")
        .set_json(json!({
            "question": KO_QUESTION,
            "group_order": ["A", "B", "C"],
            "shuffle_times": 3,
            "seed": seed,
        }))
        .to_request();
    read_ok_json(test::call_service(app, req).await).await
}

pub fn reading_id(view: &Value) -> String {
    view["id"]
        .as_str()
        .expect("reading view should carry a string id")
        .to_string()
}
