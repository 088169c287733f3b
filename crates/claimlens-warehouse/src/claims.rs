use tracing::info;

use claimlens_core::models::claim::{ClaimDetails, ClaimRecord};
use claimlens_core::objects::{column, validate_object_name, CLAIMS_TABLE, CLAIM_NOTES_TABLE};
use claimlens_core::prompts::audit_questions;

use crate::error::WarehouseError;
use crate::executor::SqlExecutor;
use crate::statement::Statement;

/// List distinct claim numbers, sorted ascending.
pub async fn list_claim_numbers(db: &dyn SqlExecutor) -> Result<Vec<String>, WarehouseError> {
    let table_name = validate_object_name(CLAIMS_TABLE)?;
    let statement = Statement::new(format!(
        "SELECT DISTINCT {claim_no} FROM {table_name} ORDER BY {claim_no}",
        claim_no = column::CLAIM_NO,
    ));

    let table = db.execute(&statement).await?;

    // Warehouse collation may differ from byte order; re-sort locally.
    let mut claims: Vec<String> = table
        .column_values(column::CLAIM_NO)
        .into_iter()
        .map(str::to_string)
        .collect();
    claims.sort();
    claims.dedup();

    info!(count = claims.len(), "listed claim numbers");

    Ok(claims)
}

/// Fetch the claim row, its parsed notes, and the audit questions for it.
///
/// An unknown claim number yields [`ClaimDetails::not_found`] rather than an
/// error. The returned record always carries `claim_no` exactly as requested.
pub async fn get_claim_details(
    db: &dyn SqlExecutor,
    claim_no: &str,
) -> Result<ClaimDetails, WarehouseError> {
    let claims_table = validate_object_name(CLAIMS_TABLE)?;
    let claim = Statement::new(format!(
        "SELECT {}, {}, {}, {}, {} FROM {claims_table} WHERE {} = ? LIMIT 1",
        column::CLAIM_NO,
        column::LINE_OF_BUSINESS,
        column::CLAIM_STATUS,
        column::CAUSE_OF_LOSS,
        column::LOSS_DESCRIPTION,
        column::CLAIM_NO,
    ))
    .bind_text(claim_no);

    let rows = db.execute(&claim).await?;
    if rows.is_empty() {
        info!(claim_no, "claim not found");
        return Ok(ClaimDetails::not_found(claim_no));
    }

    let field = |name: &str| rows.value(0, name).map(str::to_string);

    let notes_table = validate_object_name(CLAIM_NOTES_TABLE)?;
    let notes = Statement::new(format!(
        "SELECT {} FROM {notes_table} WHERE {} = ?",
        column::EXTRACTED_CONTENT,
        column::CLAIM_NO,
    ))
    .bind_text(claim_no);

    let notes = db
        .execute(&notes)
        .await?
        .column_values(column::EXTRACTED_CONTENT)
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    info!(claim_no, notes = notes.len(), "fetched claim details");

    Ok(ClaimDetails {
        record: ClaimRecord {
            claim_no: claim_no.to_string(),
            line_of_business: field(column::LINE_OF_BUSINESS),
            status: field(column::CLAIM_STATUS),
            cause_of_loss: field(column::CAUSE_OF_LOSS),
            loss_description: field(column::LOSS_DESCRIPTION),
            notes,
        },
        found: true,
        audit_questions: audit_questions(claim_no),
    })
}
