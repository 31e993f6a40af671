//! Card catalog routes.

use actix_web::http::header::{CACHE_CONTROL, ETAG};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::lang::PRIMARY_LANG;
use crate::domain::Card;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::http::etag::not_modified;
use crate::services::cards as card_service;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct CardsResponse {
    total: usize,
    items: Vec<Card>,
}

#[derive(Debug, Deserialize)]
struct MeaningsQuery {
    lang: Option<String>,
}

fn parse_card_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| {
        AppError::invalid(ErrorCode::InvalidCardId, format!("Invalid card id: {raw:?}"))
    })
}

/// GET /api/cards
///
/// Weak ETag over the catalog fingerprint; a matching `If-None-Match`
/// gets `304 Not Modified` with no body.
async fn list_cards(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let list = card_service::list_cards(&app_state)?;

    if not_modified(http_req.headers(), &list.etag) {
        return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED)
            .insert_header((ETAG, list.etag))
            .finish());
    }

    Ok(HttpResponse::Ok()
        .insert_header((ETAG, list.etag))
        .insert_header((CACHE_CONTROL, "public, max-age=300"))
        .json(CardsResponse {
            total: list.cards.len(),
            items: list.cards,
        }))
}

/// GET /api/cards/{card_id}
async fn get_card(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_card_id(&path)?;
    Ok(HttpResponse::Ok().json(card_service::get_card(&app_state, id)?))
}

/// GET /api/cards/{card_id}/meanings?lang=
async fn get_card_meanings(
    path: web::Path<String>,
    query: web::Query<MeaningsQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_card_id(&path)?;
    let lang = query.lang.as_deref().unwrap_or(PRIMARY_LANG);
    Ok(HttpResponse::Ok().json(card_service::get_card_meanings(&app_state, id, lang)?))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_cards))
        .route("/{card_id}", web::get().to(get_card))
        .route("/{card_id}/meanings", web::get().to(get_card_meanings));
}
