//! Parameterized statements and the SQL API request/response shapes.
//!
//! Every user-controlled value reaches the warehouse as a positional binding
//! (`?` in the statement text, keyed `"1"`, `"2"`, ... in the request body).
//! Only validated object names are ever spliced into the text itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use claimlens_core::connection::ConnectionConfig;
use claimlens_core::models::table::{Column, Table};

use crate::error::WarehouseError;

/// A single statement with its positional bindings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    pub sql: String,
    pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binding {
    Text(String),
    Fixed(i64),
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            bindings: Vec::new(),
        }
    }

    pub fn bind_text(mut self, value: impl Into<String>) -> Self {
        self.bindings.push(Binding::Text(value.into()));
        self
    }

    pub fn bind_fixed(mut self, value: i64) -> Self {
        self.bindings.push(Binding::Fixed(value));
        self
    }

    /// Build the body for `POST /api/v2/statements`.
    pub fn request_body(&self, config: &ConnectionConfig, timeout_secs: u64) -> StatementRequest {
        let bindings = self
            .bindings
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let value = match b {
                    Binding::Text(v) => BindingValue {
                        binding_type: "TEXT",
                        value: v.clone(),
                    },
                    Binding::Fixed(v) => BindingValue {
                        binding_type: "FIXED",
                        value: v.to_string(),
                    },
                };
                ((i + 1).to_string(), value)
            })
            .collect();

        let mut parameters = BTreeMap::new();
        parameters.insert("MULTI_STATEMENT_COUNT".to_string(), "1".to_string());

        StatementRequest {
            statement: self.sql.clone(),
            timeout: timeout_secs,
            warehouse: config.warehouse.clone(),
            role: config.role.clone(),
            bindings,
            parameters,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatementRequest {
    pub statement: String,
    pub timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub bindings: BTreeMap<String, BindingValue>,
    pub parameters: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct BindingValue {
    #[serde(rename = "type")]
    pub binding_type: &'static str,
    pub value: String,
}

/// Body of a statement response: a completed result set, an in-progress
/// handle (HTTP 202), or an error (HTTP 4xx).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub sql_state: Option<String>,
    #[serde(default)]
    pub statement_handle: Option<String>,
    #[serde(default)]
    pub result_set_meta_data: Option<ResultSetMetaData>,
    #[serde(default)]
    pub data: Option<Vec<Vec<serde_json::Value>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSetMetaData {
    #[serde(default)]
    pub num_rows: Option<u64>,
    #[serde(default)]
    pub row_type: Vec<RowType>,
    #[serde(default)]
    pub partition_info: Vec<PartitionInfo>,
}

#[derive(Debug, Deserialize)]
pub struct RowType {
    pub name: String,
    #[serde(rename = "type", default)]
    pub data_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionInfo {
    #[serde(default)]
    pub row_count: Option<u64>,
}

impl StatementResponse {
    /// Number of result partitions; partition 0 is inlined in the first
    /// response.
    pub fn partition_count(&self) -> usize {
        self.result_set_meta_data
            .as_ref()
            .map(|m| m.partition_info.len().max(1))
            .unwrap_or(1)
    }
}

/// Convert a completed response into a [`Table`], appending rows from any
/// further partitions.
pub fn into_table(
    response: StatementResponse,
    extra_partitions: Vec<Vec<Vec<serde_json::Value>>>,
) -> Result<Table, WarehouseError> {
    let meta = response.result_set_meta_data.ok_or_else(|| {
        WarehouseError::ResponseParse("result set metadata missing".to_string())
    })?;

    let columns: Vec<Column> = meta
        .row_type
        .into_iter()
        .map(|r| Column {
            name: r.name,
            data_type: r.data_type,
        })
        .collect();

    let rows = response
        .data
        .unwrap_or_default()
        .into_iter()
        .chain(extra_partitions.into_iter().flatten())
        .map(|row| row.into_iter().map(cell_to_text).collect())
        .collect();

    Ok(Table { columns, rows })
}

fn cell_to_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
