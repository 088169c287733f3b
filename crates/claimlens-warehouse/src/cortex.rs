//! LLM-backed helpers exposed as warehouse functions.
//!
//! Both calls are ordinary statements with bound arguments, so they share the
//! warehouse error contract.

use tracing::{info, warn};

use claimlens_core::objects::{
    stage_ref, validate_object_name, IMAGE_SUMMARY_MODEL, IMAGE_SUMMARY_PROMPT,
};

use crate::error::WarehouseError;
use crate::executor::SqlExecutor;
use crate::statement::Statement;

pub const NO_SUMMARY: &str = "No summary could be generated.";

/// Ask the multimodal model to summarize a staged image.
///
/// `Ok(None)` means the model answered with nothing usable; callers show
/// [`NO_SUMMARY`] in its place.
pub async fn summarize_image(
    db: &dyn SqlExecutor,
    stage: &str,
    file_name: &str,
) -> Result<Option<String>, WarehouseError> {
    let stage = stage_ref(validate_object_name(stage)?);
    let statement =
        Statement::new("SELECT SNOWFLAKE.CORTEX.COMPLETE(?, ?, TO_FILE(?, ?))")
            .bind_text(IMAGE_SUMMARY_MODEL)
            .bind_text(IMAGE_SUMMARY_PROMPT)
            .bind_text(stage.as_str())
            .bind_text(file_name);

    info!(model = IMAGE_SUMMARY_MODEL, file_name, "summarizing image");

    let table = db.execute(&statement).await?;
    let summary = table
        .scalar()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(summary)
}

/// Semantic similarity of two texts in `[0, 1]`.
///
/// Returns `Ok(None)` without calling the warehouse when either input is
/// blank, and when the function yields no usable number.
pub async fn similarity(
    db: &dyn SqlExecutor,
    text_a: &str,
    text_b: &str,
) -> Result<Option<f64>, WarehouseError> {
    if text_a.trim().is_empty() || text_b.trim().is_empty() {
        return Ok(None);
    }

    let statement = Statement::new("SELECT SNOWFLAKE.CORTEX.AI_SIMILARITY(?, ?)")
        .bind_text(text_a)
        .bind_text(text_b);

    let table = db.execute(&statement).await?;
    let Some(raw) = table.scalar() else {
        return Ok(None);
    };

    let score = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| WarehouseError::ResponseParse(format!("similarity score {raw:?}: {e}")))?;

    if score.is_nan() {
        return Ok(None);
    }
    if !(0.0..=1.0).contains(&score) {
        warn!(score, "similarity score outside [0, 1], clamping");
    }

    Ok(Some(score.clamp(0.0, 1.0)))
}
