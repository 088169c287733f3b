use tracing::info;

use claimlens_core::models::image::ImageAsset;
use claimlens_core::objects::{base_file_name, stage_ref, validate_object_name, PRESIGNED_URL_TTL_SECS};

use crate::error::WarehouseError;
use crate::executor::SqlExecutor;
use crate::statement::Statement;

/// List the files in a stage as base names, sorted ascending.
pub async fn list_stage_files(
    db: &dyn SqlExecutor,
    stage: &str,
) -> Result<Vec<String>, WarehouseError> {
    let stage = stage_ref(validate_object_name(stage)?);
    let table = db.execute(&Statement::new(format!("LS {stage}"))).await?;

    if !table.is_empty() && table.column_index("name").is_none() {
        return Err(WarehouseError::ResponseParse(format!(
            "stage listing for {stage} has no name column"
        )));
    }

    let mut files: Vec<String> = table
        .column_values("name")
        .into_iter()
        .map(|path| base_file_name(path).to_string())
        .filter(|name| !name.is_empty())
        .collect();
    files.sort();

    info!(stage = %stage, count = files.len(), "listed stage files");

    Ok(files)
}

/// Download one file from a stage.
///
/// Resolves a presigned URL for the file and fetches it in full; any failure
/// is returned as an error, never a truncated body.
pub async fn fetch_stage_file(
    db: &dyn SqlExecutor,
    stage: &str,
    file_name: &str,
) -> Result<ImageAsset, WarehouseError> {
    check_file_name(file_name)?;
    let stage = stage_ref(validate_object_name(stage)?);

    let statement = Statement::new(format!("SELECT GET_PRESIGNED_URL({stage}, ?, ?)"))
        .bind_text(file_name)
        .bind_fixed(i64::from(PRESIGNED_URL_TTL_SECS));

    let table = db.execute(&statement).await?;
    let url = table
        .scalar()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| WarehouseError::NotFound {
            what: format!("{stage}/{file_name}"),
        })?
        .to_string();

    let bytes = db.download(&url).await?;

    info!(stage = %stage, file_name, size = bytes.len(), "fetched stage file");

    Ok(ImageAsset {
        file_name: file_name.to_string(),
        bytes,
    })
}

fn check_file_name(file_name: &str) -> Result<(), WarehouseError> {
    if file_name.is_empty() || file_name.contains('/') || file_name.contains("..") {
        return Err(WarehouseError::Rejected(format!(
            "invalid stage file name: {file_name:?}"
        )));
    }
    Ok(())
}
