#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use axum::Router;
use tower::ServiceExt;

use claimlens_analyst::client::{AnalystService, BoxFuture};
use claimlens_analyst::error::AnalystError;
use claimlens_analyst::wire::AnalystReply;
use claimlens_core::models::chat::{ChatMessage, ContentBlock};
use claimlens_core::models::table::{Column, Table};
use claimlens_server::state::AppState;
use claimlens_session::dispatcher::Dispatcher;
use claimlens_warehouse::access::ClaimData;
use claimlens_warehouse::error::WarehouseError;
use claimlens_warehouse::executor::{BoxFuture as SqlFuture, SqlExecutor};
use claimlens_warehouse::statement::Statement;

/// Analyst that echoes the last user message back.
pub struct EchoAnalyst;

impl AnalystService for EchoAnalyst {
    fn send<'a>(
        &'a self,
        transcript: &'a [ChatMessage],
        _semantic_model_ref: &'a str,
    ) -> BoxFuture<'a, Result<AnalystReply, AnalystError>> {
        let last = transcript.last().map(|m| m.text()).unwrap_or_default();
        Box::pin(async move {
            Ok(AnalystReply {
                content: vec![ContentBlock::text(format!("You asked: {last}"))],
                request_id: None,
                warnings: Vec::new(),
            })
        })
    }
}

#[derive(Default)]
pub struct FakeWarehouse {
    replies: Vec<(String, Table)>,
    downloads: HashMap<String, Vec<u8>>,
}

impl FakeWarehouse {
    pub fn on(mut self, fragment: &str, table: Table) -> Self {
        self.replies.push((fragment.to_string(), table));
        self
    }

    pub fn with_download(mut self, url: &str, bytes: &[u8]) -> Self {
        self.downloads.insert(url.to_string(), bytes.to_vec());
        self
    }
}

impl SqlExecutor for FakeWarehouse {
    fn execute<'a>(&'a self, statement: &'a Statement) -> SqlFuture<'a, Result<Table, WarehouseError>> {
        let table = self
            .replies
            .iter()
            .find(|(fragment, _)| statement.sql.contains(fragment.as_str()))
            .map(|(_, table)| table.clone())
            .unwrap_or_default();
        Box::pin(async move { Ok(table) })
    }

    fn download<'a>(&'a self, url: &'a str) -> SqlFuture<'a, Result<Vec<u8>, WarehouseError>> {
        let bytes = self.downloads.get(url).cloned();
        Box::pin(async move {
            bytes.ok_or_else(|| WarehouseError::NotFound {
                what: url.to_string(),
            })
        })
    }
}

pub fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
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
            .map(|row| row.iter().map(|v| Some(v.to_string())).collect())
            .collect(),
    }
}

pub const PRESIGNED: &str = "https://stage.example.com/roof.jpg?sig=abc";

pub fn app() -> Router {
    let warehouse = FakeWarehouse::default()
        .on("SELECT DISTINCT", table(&["CLAIM_NO"], &[&["CL-1001"]]))
        .on(
            "LOSS_CLAIMS.CLAIMS WHERE",
            table(
                &["CLAIM_NO", "LOSS_DESCRIPTION"],
                &[&["CL-1001", "Roof damaged by hail"]],
            ),
        )
        .on("LS @", table(&["name"], &[&["loss_evidence/roof.jpg"]]))
        .on("GET_PRESIGNED_URL", table(&["URL"], &[&[PRESIGNED]]))
        .with_download(PRESIGNED, b"\xff\xd8\xff\xe0jpeg");
    let data = Arc::new(ClaimData::new(Arc::new(warehouse)));
    let dispatcher = Dispatcher::new(data, Arc::new(EchoAnalyst));
    claimlens_server::router(AppState::new(dispatcher))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}
