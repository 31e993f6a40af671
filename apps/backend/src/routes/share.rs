use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::services::readings::{get_reading, ReadingView};
use crate::services::share::resolve_share_alias;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct SharedReading {
    slug: String,
    reading: ReadingView,
}

/// GET /api/share/{slug}
async fn resolve(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    let reading_id = resolve_share_alias(&app_state, &slug).await?;
    let reading = get_reading(&app_state, &reading_id).await?;
    Ok(HttpResponse::Ok().json(SharedReading {
        slug,
        reading: ReadingView::from(reading),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{slug}", web::get().to(resolve));
}
