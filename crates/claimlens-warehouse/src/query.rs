use tracing::{info, warn};

use claimlens_core::models::table::Table;

use crate::error::WarehouseError;
use crate::executor::SqlExecutor;
use crate::statement::Statement;

const READ_KEYWORDS: &[&str] = &["SELECT", "WITH", "SHOW", "DESCRIBE", "DESC"];

/// Execute an ad-hoc read query, such as SQL generated by the analyst.
pub async fn run_query(db: &dyn SqlExecutor, sql: &str) -> Result<Table, WarehouseError> {
    let keyword = first_keyword(sql).to_ascii_uppercase();
    if !READ_KEYWORDS.contains(&keyword.as_str()) {
        warn!(keyword = %keyword, "rejected non-read statement");
        return Err(WarehouseError::Rejected(format!(
            "only read queries may be executed (got {})",
            if keyword.is_empty() { "an empty statement" } else { keyword.as_str() }
        )));
    }

    let table = db.execute(&Statement::new(sql)).await?;
    info!(rows = table.rows.len(), columns = table.columns.len(), "ad-hoc query complete");
    Ok(table)
}

/// First keyword of a statement, skipping whitespace, `--` line comments, and
/// `/* */` block comments.
pub fn first_keyword(sql: &str) -> &str {
    let mut rest = sql;
    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix("--") {
            rest = after.split_once('\n').map(|(_, r)| r).unwrap_or("");
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.split_once("*/").map(|(_, r)| r).unwrap_or("");
        } else if let Some(after) = rest.strip_prefix('(') {
            rest = after;
        } else {
            break;
        }
    }
    let end = rest
        .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .unwrap_or(rest.len());
    &rest[..end]
}
