use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::domain::RequestedLang;
use crate::error::AppError;
use crate::routes::parse_flag;
use crate::services::daily::daily_fortune;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct DailyQuery {
    lang: Option<String>,
    seed: Option<i64>,
    use_llm: Option<String>,
}

/// GET /api/daily?lang=&seed=&use_llm=
async fn daily(
    query: web::Query<DailyQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let lang = match query.lang.as_deref() {
        Some(code) => RequestedLang::parse(code)?,
        None => RequestedLang::default(),
    };
    let use_llm = parse_flag(query.use_llm.as_deref(), "use_llm")?;
    let fortune = daily_fortune(&app_state, lang, query.seed, use_llm).await?;
    Ok(HttpResponse::Ok().json(fortune))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(daily));
}
