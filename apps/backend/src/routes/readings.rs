//! Reading routes: create, fetch, interpret, full result, share.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::dealing::{MAX_SHUFFLE_TIMES, MIN_SHUFFLE_TIMES};
use crate::domain::reading::QUESTION_MAX_CHARS;
use crate::domain::{GroupOrder, RequestedLang};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{ReadingId, ValidatedJson};
use crate::routes::parse_flag;
use crate::services::interpretations::{self, InterpretRequest, DEFAULT_STYLE};
use crate::services::readings::{self, CreateReading, ReadingView};
use crate::services::share;
use crate::state::app_state::AppState;

const STYLE_MAX_CHARS: usize = 32;

fn default_shuffle_times() -> i64 {
    1
}

fn default_true() -> bool {
    true
}

fn default_lang() -> String {
    "ko".to_string()
}

fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}

#[derive(Debug, Deserialize)]
pub struct ReadingRequest {
    pub question: String,
    pub group_order: GroupOrder,
    #[serde(default = "default_shuffle_times")]
    pub shuffle_times: i64,
    #[serde(default)]
    pub seed: Option<i64>,
    #[serde(default = "default_true")]
    pub allow_reversed: bool,
}

impl ReadingRequest {
    /// Field checks that map to 422, ahead of the engine's own checks.
    fn into_command(self) -> Result<CreateReading, AppError> {
        let len = self.question.chars().count();
        if len == 0 || len > QUESTION_MAX_CHARS {
            return Err(AppError::unprocessable(
                ErrorCode::InvalidQuestion,
                format!("question must be 1..={QUESTION_MAX_CHARS} characters, got {len}"),
            ));
        }
        let shuffle_times = u8::try_from(self.shuffle_times)
            .ok()
            .filter(|n| (MIN_SHUFFLE_TIMES..=MAX_SHUFFLE_TIMES).contains(n))
            .ok_or_else(|| {
                AppError::unprocessable(
                    ErrorCode::InvalidShuffleTimes,
                    format!(
                        "shuffle_times must be {MIN_SHUFFLE_TIMES}..={MAX_SHUFFLE_TIMES}, got {}",
                        self.shuffle_times
                    ),
                )
            })?;
        Ok(CreateReading {
            question: self.question,
            order: self.group_order,
            shuffle_times,
            seed: self.seed,
            allow_reversed: self.allow_reversed,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct InterpretBody {
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default)]
    pub use_llm: bool,
}

impl InterpretBody {
    fn into_request(self) -> Result<InterpretRequest, AppError> {
        let lang = RequestedLang::parse(&self.lang)
            .map_err(|e| AppError::unprocessable(ErrorCode::InvalidLanguage, e.to_string()))?;
        let style = self.style.trim();
        if style.is_empty() || style.chars().count() > STYLE_MAX_CHARS {
            return Err(AppError::unprocessable(
                ErrorCode::ValidationError,
                format!("style must be 1..={STYLE_MAX_CHARS} characters"),
            ));
        }
        Ok(InterpretRequest {
            lang,
            style: style.to_string(),
            use_llm: self.use_llm,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ResultQuery {
    lang: Option<String>,
    use_llm: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub slug: String,
    pub reading_id: String,
}

/// POST /api/readings
async fn create_reading(
    body: ValidatedJson<ReadingRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let command = body.into_inner().into_command()?;
    let reading = readings::create_reading(&app_state, command).await?;
    Ok(HttpResponse::Ok().json(ReadingView::from(reading)))
}

/// GET /api/readings/{reading_id}
async fn get_reading(
    reading_id: ReadingId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let reading = readings::get_reading(&app_state, reading_id.as_str()).await?;
    Ok(HttpResponse::Ok().json(ReadingView::from(reading)))
}

/// POST /api/readings/{reading_id}/interpret
async fn interpret(
    reading_id: ReadingId,
    body: ValidatedJson<InterpretBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner().into_request()?;
    let interpretation =
        interpretations::interpret(&app_state, reading_id.as_str(), &request).await?;
    Ok(HttpResponse::Ok().json(interpretation))
}

/// GET /api/readings/{reading_id}/result?lang=&use_llm=
async fn full_result(
    reading_id: ReadingId,
    query: web::Query<ResultQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let lang = match query.lang.as_deref() {
        Some(code) => RequestedLang::parse(code)?,
        None => RequestedLang::default(),
    };
    let use_llm = parse_flag(query.use_llm.as_deref(), "use_llm")?;
    let result =
        interpretations::get_full_result(&app_state, reading_id.as_str(), lang, use_llm).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// POST /api/readings/{reading_id}/share
async fn create_share(
    reading_id: ReadingId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let slug = share::create_share_alias(&app_state, reading_id.as_str()).await?;
    Ok(HttpResponse::Ok().json(ShareResponse {
        slug,
        reading_id: reading_id.0,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_reading))
        .route("/{reading_id}", web::get().to(get_reading))
        .route("/{reading_id}/interpret", web::post().to(interpret))
        .route("/{reading_id}/result", web::get().to(full_result))
        .route("/{reading_id}/share", web::post().to(create_share));
}
