use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod cards;
pub mod daily;
pub mod health;
pub mod readings;
pub mod share;

/// Register every route. Used by `main.rs` and by tests alike.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query string: {err}")).into()
    }));

    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Card catalog: /api/cards/**
    cfg.service(web::scope("/api/cards").configure(cards::configure_routes));

    // Readings: /api/readings/**
    cfg.service(web::scope("/api/readings").configure(readings::configure_routes));

    // Daily card: /api/daily
    cfg.service(web::scope("/api/daily").configure(daily::configure_routes));

    // Share links: /api/share/**
    cfg.service(web::scope("/api/share").configure(share::configure_routes));
}

/// Lenient boolean for query strings: `1/true/yes/on` and `0/false/no/off`.
pub(crate) fn parse_flag(raw: Option<&str>, name: &str) -> Result<bool, AppError> {
    match raw.map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "" | "0" | "false" | "no" | "off" => Ok(false),
            "1" | "true" | "yes" | "on" => Ok(true),
            _ => Err(AppError::bad_request(
                ErrorCode::BadRequest,
                format!("{name} must be a boolean, got {v:?}"),
            )),
        },
    }
}
