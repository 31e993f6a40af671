use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

const MAX_ID_LEN: usize = 64;

/// Reading id from the `{reading_id}` path segment.
///
/// Only the shape is checked here; existence is the store's call, so an
/// unknown but well-formed id yields 404 rather than 400.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingId(pub String);

impl ReadingId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let well_formed = !raw.is_empty()
            && raw.len() <= MAX_ID_LEN
            && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !well_formed {
            return Err(AppError::invalid(
                ErrorCode::InvalidReadingId,
                format!("Invalid reading id: {raw:?}"),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for ReadingId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(match req.match_info().get("reading_id") {
            Some(raw) => ReadingId::parse(raw),
            None => Err(AppError::invalid(
                ErrorCode::InvalidReadingId,
                "Missing reading_id parameter",
            )),
        })
    }
}
