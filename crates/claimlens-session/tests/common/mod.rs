#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use claimlens_analyst::client::{AnalystService, BoxFuture};
use claimlens_analyst::error::AnalystError;
use claimlens_analyst::wire::AnalystReply;
use claimlens_core::models::chat::{ChatMessage, ContentBlock};
use claimlens_core::models::table::{Column, Table};
use claimlens_session::dispatcher::Dispatcher;
use claimlens_warehouse::access::ClaimData;
use claimlens_warehouse::error::WarehouseError;
use claimlens_warehouse::executor::{BoxFuture as SqlFuture, SqlExecutor};
use claimlens_warehouse::statement::Statement;

/// Analyst that answers from a script and records every transcript it was
/// sent along with the semantic model reference.
#[derive(Default)]
pub struct ScriptedAnalyst {
    script: Mutex<VecDeque<Result<AnalystReply, AnalystError>>>,
    pub sent: Mutex<Vec<(Vec<ChatMessage>, String)>>,
}

impl ScriptedAnalyst {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, outcome: Result<AnalystReply, AnalystError>) -> Self {
        self.script.lock().unwrap().push_back(outcome);
        self
    }

    pub fn then_text(self, text: &str) -> Self {
        self.then(Ok(reply(vec![ContentBlock::text(text)])))
    }

    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl AnalystService for ScriptedAnalyst {
    fn send<'a>(
        &'a self,
        transcript: &'a [ChatMessage],
        semantic_model_ref: &'a str,
    ) -> BoxFuture<'a, Result<AnalystReply, AnalystError>> {
        self.sent
            .lock()
            .unwrap()
            .push((transcript.to_vec(), semantic_model_ref.to_string()));
        let outcome = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(reply(vec![ContentBlock::text("ok")])));
        Box::pin(async move { outcome })
    }
}

pub fn reply(content: Vec<ContentBlock>) -> AnalystReply {
    AnalystReply {
        content,
        request_id: Some("req-1".to_string()),
        warnings: Vec::new(),
    }
}

/// Warehouse answering statements by SQL fragment.
#[derive(Default)]
pub struct FakeWarehouse {
    replies: Vec<(String, Result<Table, String>)>,
    pub calls: Mutex<Vec<Statement>>,
}

impl FakeWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, fragment: &str, table: Table) -> Self {
        self.replies.push((fragment.to_string(), Ok(table)));
        self
    }

    pub fn fail_on(mut self, fragment: &str, message: &str) -> Self {
        self.replies
            .push((fragment.to_string(), Err(message.to_string())));
        self
    }

    pub fn count_matching(&self, fragment: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.sql.contains(fragment))
            .count()
    }
}

impl SqlExecutor for FakeWarehouse {
    fn execute<'a>(&'a self, statement: &'a Statement) -> SqlFuture<'a, Result<Table, WarehouseError>> {
        self.calls.lock().unwrap().push(statement.clone());
        let reply = self
            .replies
            .iter()
            .find(|(fragment, _)| statement.sql.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone());
        Box::pin(async move {
            match reply {
                Some(Ok(table)) => Ok(table),
                Some(Err(message)) => Err(WarehouseError::Query {
                    code: "002003".to_string(),
                    message,
                }),
                None => Ok(Table::default()),
            }
        })
    }

    fn download<'a>(&'a self, url: &'a str) -> SqlFuture<'a, Result<Vec<u8>, WarehouseError>> {
        Box::pin(async move {
            Err(WarehouseError::NotFound {
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

pub const CLAIM_LOOKUP: &str = "LOSS_CLAIMS.CLAIMS WHERE";
pub const NOTES_LOOKUP: &str = "PARSED_CLAIM_NOTES";

/// A warehouse with two claims, CL-1001 having a description and one note.
pub fn claims_warehouse() -> FakeWarehouse {
    FakeWarehouse::new()
        .on(
            "SELECT DISTINCT",
            table(&["CLAIM_NO"], &[&[Some("CL-1002")], &[Some("CL-1001")]]),
        )
        .on(
            CLAIM_LOOKUP,
            table(
                &[
                    "CLAIM_NO",
                    "LINE_OF_BUSINESS",
                    "CLAIM_STATUS",
                    "CAUSE_OF_LOSS",
                    "LOSS_DESCRIPTION",
                ],
                &[&[
                    Some("CL-1001"),
                    Some("Property"),
                    Some("Open"),
                    Some("Hail"),
                    Some("Roof damaged by hail"),
                ]],
            ),
        )
        .on(
            NOTES_LOOKUP,
            table(&["EXTRACTED_CONTENT"], &[&[Some("Adjuster visited site")]]),
        )
}

pub fn dispatcher(
    warehouse: FakeWarehouse,
    analyst: ScriptedAnalyst,
) -> (Dispatcher, Arc<FakeWarehouse>, Arc<ScriptedAnalyst>) {
    let warehouse = Arc::new(warehouse);
    let analyst = Arc::new(analyst);
    let data = Arc::new(ClaimData::new(warehouse.clone()));
    (Dispatcher::new(data, analyst.clone()), warehouse, analyst)
}
