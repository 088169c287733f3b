#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use claimlens_core::models::table::{Column, Table};
use claimlens_warehouse::error::WarehouseError;
use claimlens_warehouse::executor::{BoxFuture, SqlExecutor};
use claimlens_warehouse::statement::Statement;

#[derive(Clone)]
pub enum Reply {
    Rows(Table),
    Fail(String),
}

/// In-memory warehouse: answers statements whose text contains a registered
/// fragment, and records every statement it sees.
#[derive(Default)]
pub struct FakeWarehouse {
    replies: Vec<(String, Reply)>,
    downloads: HashMap<String, Vec<u8>>,
    pub calls: Mutex<Vec<Statement>>,
}

impl FakeWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, fragment: &str, table: Table) -> Self {
        self.replies.push((fragment.to_string(), Reply::Rows(table)));
        self
    }

    pub fn fail_on(mut self, fragment: &str, message: &str) -> Self {
        self.replies
            .push((fragment.to_string(), Reply::Fail(message.to_string())));
        self
    }

    pub fn with_download(mut self, url: &str, bytes: &[u8]) -> Self {
        self.downloads.insert(url.to_string(), bytes.to_vec());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.calls.lock().unwrap().clone()
    }
}

impl SqlExecutor for FakeWarehouse {
    fn execute<'a>(
        &'a self,
        statement: &'a Statement,
    ) -> BoxFuture<'a, Result<Table, WarehouseError>> {
        self.calls.lock().unwrap().push(statement.clone());
        let reply = self
            .replies
            .iter()
            .find(|(fragment, _)| statement.sql.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone());
        Box::pin(async move {
            match reply {
                Some(Reply::Rows(table)) => Ok(table),
                Some(Reply::Fail(message)) => Err(WarehouseError::Query {
                    code: "002003".to_string(),
                    message,
                }),
                None => Ok(Table::default()),
            }
        })
    }

    fn download<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, WarehouseError>> {
        let bytes = self.downloads.get(url).cloned();
        Box::pin(async move {
            bytes.ok_or_else(|| WarehouseError::NotFound {
                what: url.to_string(),
            })
        })
    }
}

pub fn table(columns: &[&str], rows: &[&[Option<&str>]]) -> Table {
    Table {
        columns: columns
            .iter()
            .map(|name| Column {
                name: name.to_string(),
                data_type: "text".to_string(),
            })
            .collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|v| v.map(str::to_string)).collect())
            .collect(),
    }
}
