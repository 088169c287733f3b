//! HTTP client for the warehouse SQL REST API.
//!
//! Statements are submitted to `POST /api/v2/statements`. A statement that
//! outlives the synchronous window comes back as HTTP 202 with a handle, which
//! is polled until it completes. Large result sets are split into partitions;
//! partition 0 is inlined and the rest are fetched by index.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use claimlens_core::connection::ConnectionConfig;
use claimlens_core::models::table::Table;
use claimlens_core::objects::STATEMENTS_ENDPOINT;

use crate::error::WarehouseError;
use crate::executor::{BoxFuture, SqlExecutor};
use crate::statement::{into_table, Statement, StatementResponse};

/// Server-side execution limit passed with every statement.
const STATEMENT_TIMEOUT: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(500);

const USER_AGENT: &str = concat!("claimlens/", env!("CARGO_PKG_VERSION"));

pub struct SnowflakeClient {
    http: reqwest::Client,
    config: ConnectionConfig,
}

impl SnowflakeClient {
    pub fn new(config: ConnectionConfig) -> Result<Self, WarehouseError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(STATEMENT_TIMEOUT + Duration::from_secs(15))
            .build()
            .map_err(|e| WarehouseError::Connection(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Run `SELECT 1` to prove the account URL and token are usable.
    pub async fn ping(&self) -> Result<(), WarehouseError> {
        self.run(&Statement::new("SELECT 1")).await?;
        info!(account_url = %self.config.account_url, "warehouse connection verified");
        Ok(())
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.bearer_auth(&self.config.token)
            .header(
                "X-Snowflake-Authorization-Token-Type",
                self.config.token_type.header_value(),
            )
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn run(&self, statement: &Statement) -> Result<Table, WarehouseError> {
        let body = statement.request_body(&self.config, STATEMENT_TIMEOUT.as_secs());
        let url = self.config.endpoint(STATEMENTS_ENDPOINT);

        debug!(sql = %statement.sql, bindings = statement.bindings.len(), "submitting statement");

        let resp = self
            .authorized(self.http.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let mut response = read_response(resp).await?;
        let deadline = tokio::time::Instant::now() + STATEMENT_TIMEOUT + POLL_INTERVAL;

        while let Some(handle) = pending_handle(&response) {
            if tokio::time::Instant::now() >= deadline {
                return Err(WarehouseError::Api(format!(
                    "statement {handle} still running after {}s",
                    STATEMENT_TIMEOUT.as_secs()
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
            let resp = self
                .authorized(self.http.get(self.statement_url(&handle)))
                .send()
                .await
                .map_err(transport_error)?;
            response = read_response(resp).await?;
        }

        let partitions = response.partition_count();
        let mut extra = Vec::new();
        if partitions > 1 {
            let handle = response.statement_handle.clone().ok_or_else(|| {
                WarehouseError::ResponseParse("partitioned result without handle".to_string())
            })?;
            for partition in 1..partitions {
                extra.push(self.fetch_partition(&handle, partition).await?);
            }
        }

        let table = into_table(response, extra)?;
        debug!(rows = table.rows.len(), partitions, "statement complete");
        Ok(table)
    }

    async fn fetch_partition(
        &self,
        handle: &str,
        partition: usize,
    ) -> Result<Vec<Vec<serde_json::Value>>, WarehouseError> {
        let resp = self
            .authorized(self.http.get(self.statement_url(handle)))
            .query(&[("partition", partition)])
            .send()
            .await
            .map_err(transport_error)?;
        let response = read_response(resp).await?;
        Ok(response.data.unwrap_or_default())
    }

    fn statement_url(&self, handle: &str) -> String {
        self.config.endpoint(&format!("{STATEMENTS_ENDPOINT}/{handle}"))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, WarehouseError> {
        let resp = self.http.get(url).send().await.map_err(transport_error)?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(WarehouseError::NotFound {
                what: "staged file".to_string(),
            });
        }
        if !status.is_success() {
            return Err(WarehouseError::Api(format!(
                "download failed with status {status}"
            )));
        }
        let bytes = resp.bytes().await.map_err(transport_error)?;
        Ok(bytes.to_vec())
    }
}

impl SqlExecutor for SnowflakeClient {
    fn execute<'a>(
        &'a self,
        statement: &'a Statement,
    ) -> BoxFuture<'a, Result<Table, WarehouseError>> {
        Box::pin(self.run(statement))
    }

    fn download<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, WarehouseError>> {
        Box::pin(self.fetch_bytes(url))
    }
}

/// A response without result metadata but with a handle is still running.
fn pending_handle(response: &StatementResponse) -> Option<String> {
    match (&response.result_set_meta_data, &response.statement_handle) {
        (None, Some(handle)) => Some(handle.clone()),
        _ => None,
    }
}

async fn read_response(resp: reqwest::Response) -> Result<StatementResponse, WarehouseError> {
    let status = resp.status();
    let text = resp.text().await.map_err(transport_error)?;
    let body: StatementResponse = if text.trim().is_empty() {
        StatementResponse::default()
    } else {
        serde_json::from_str(&text)
            .map_err(|e| WarehouseError::ResponseParse(format!("{e} (status {status})")))?
    };

    match status {
        s if s.is_success() => Ok(body),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            warn!(%status, "warehouse rejected credentials");
            Err(WarehouseError::Connection(
                body.message
                    .unwrap_or_else(|| format!("authentication failed ({status})")),
            ))
        }
        StatusCode::UNPROCESSABLE_ENTITY | StatusCode::BAD_REQUEST => Err(WarehouseError::Query {
            code: body.code.unwrap_or_default(),
            message: body.message.unwrap_or_else(|| "statement failed".to_string()),
        }),
        StatusCode::NOT_FOUND => Err(WarehouseError::NotFound {
            what: body.message.unwrap_or_else(|| "statement handle".to_string()),
        }),
        _ => Err(WarehouseError::Api(format!(
            "status {status}: {}",
            body.message.unwrap_or_else(|| "no message".to_string())
        ))),
    }
}

fn transport_error(e: reqwest::Error) -> WarehouseError {
    if e.is_connect() {
        WarehouseError::Connection(e.to_string())
    } else if e.is_timeout() {
        WarehouseError::Api(format!("request timed out: {e}"))
    } else {
        WarehouseError::Api(e.to_string())
    }
}
