use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// Request bodies larger than this are rejected before parsing.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// JSON body extractor with problem-details errors.
///
/// Syntax errors are 400 `BAD_REQUEST`. Well-formed JSON that does not fit
/// the target type (missing fields, wrong types, rejected values such as a
/// duplicate group label) is 422 `VALIDATION_ERROR`. An empty body
/// deserializes as `{}` so all-default requests need no payload.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("")
            .to_string();

        Box::pin(async move {
            let trace_id = trace_ctx::trace_id();

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(trace_id = %trace_id, error = %e, "Failed to read request body chunk");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        format!("Request body exceeds {MAX_BODY_BYTES} bytes"),
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            let raw: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
                b"{}"
            } else {
                &body[..]
            };

            let parsed = serde_json::from_slice::<T>(raw).map_err(|e| {
                debug!(
                    trace_id = %trace_id,
                    error = %e,
                    content_type = %content_type,
                    body_size = body.len(),
                    "JSON body rejected"
                );
                json_error_to_app_error(&e)
            })?;

            Ok(ValidatedJson(parsed))
        })
    }
}

fn json_error_to_app_error(error: &JsonError) -> AppError {
    match error.classify() {
        serde_json::error::Category::Data => {
            AppError::unprocessable(ErrorCode::ValidationError, data_error_detail(error))
        }
        _ => AppError::bad_request(ErrorCode::BadRequest, classify_json_error(error)),
    }
}

/// serde's message without the trailing position suffix.
fn data_error_detail(error: &JsonError) -> String {
    let msg = error.to_string();
    match msg.rfind(" at line ") {
        Some(idx) => msg[..idx].to_string(),
        None => msg,
    }
}

/// Sanitized message for malformed JSON.
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            format!("Invalid JSON at line {}", error.line())
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "Invalid JSON: wrong types for one or more fields".to_string()
        }
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}
