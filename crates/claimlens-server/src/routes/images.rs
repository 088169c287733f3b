use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use claimlens_core::objects::EVIDENCE_STAGE;

use crate::error::ApiError;
use crate::state::AppState;

/// Serve an evidence file from the stage.
pub async fn get_image(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let asset = state.data().fetch_stage_file(EVIDENCE_STAGE, &file_name).await?;
    Ok(([(header::CONTENT_TYPE, asset.content_type())], asset.bytes))
}
