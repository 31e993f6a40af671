use tracing::info;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::AppState;

/// Existing or newly minted share alias for a stored reading.
pub async fn create_share_alias(state: &AppState, reading_id: &str) -> Result<String, AppError> {
    let slug = state.store.create_share_slug(reading_id).await?;
    info!(reading_id, slug = %slug, "share alias ready");
    Ok(slug)
}

pub async fn resolve_share_alias(state: &AppState, slug: &str) -> Result<String, AppError> {
    state
        .store
        .resolve_share_slug(slug)
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                ErrorCode::ShareSlugNotFound,
                format!("Share link {slug} not found"),
            )
        })
}
