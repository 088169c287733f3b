use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::{info, warn};

use claimlens_core::connection::ConnectionConfig;
use claimlens_core::models::chat::ChatMessage;
use claimlens_core::objects::{ANALYST_ENDPOINT, ANALYST_TIMEOUT};

use crate::error::AnalystError;
use crate::wire::{AnalystErrorBody, AnalystReply, AnalystRequest, AnalystResponse};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The analyst service as seen by the conversation: one call per pending
/// user turn. Does not touch the transcript.
pub trait AnalystService: Send + Sync {
    fn send<'a>(
        &'a self,
        transcript: &'a [ChatMessage],
        semantic_model_ref: &'a str,
    ) -> BoxFuture<'a, Result<AnalystReply, AnalystError>>;
}

/// HTTP client for the analyst message endpoint.
pub struct AnalystClient {
    http: reqwest::Client,
    config: ConnectionConfig,
    timeout: Duration,
}

impl AnalystClient {
    pub fn new(config: ConnectionConfig) -> Result<Self, AnalystError> {
        Self::with_timeout(config, ANALYST_TIMEOUT)
    }

    pub fn with_timeout(config: ConnectionConfig, timeout: Duration) -> Result<Self, AnalystError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalystError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            config,
            timeout,
        })
    }

    async fn post_message(
        &self,
        transcript: &[ChatMessage],
        semantic_model_ref: &str,
    ) -> Result<AnalystReply, AnalystError> {
        let request = AnalystRequest::new(transcript, semantic_model_ref);

        info!(
            messages = request.messages.len(),
            semantic_model = semantic_model_ref,
            "sending transcript to analyst"
        );

        let resp = self
            .http
            .post(self.config.endpoint(ANALYST_ENDPOINT))
            .bearer_auth(&self.config.token)
            .header(
                "X-Snowflake-Authorization-Token-Type",
                self.config.token_type.header_value(),
            )
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = parse_error_message(&text);
            warn!(status = status.as_u16(), message = %message, "analyst returned an error");
            return Err(AnalystError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply = parse_reply(&text)?;

        info!(
            request_id = reply.request_id.as_deref().unwrap_or("-"),
            blocks = reply.content.len(),
            "analyst reply received"
        );

        Ok(reply)
    }

    fn transport_error(&self, e: reqwest::Error) -> AnalystError {
        if e.is_timeout() {
            AnalystError::Timeout(self.timeout)
        } else {
            AnalystError::Transport(e.to_string())
        }
    }
}

impl AnalystService for AnalystClient {
    fn send<'a>(
        &'a self,
        transcript: &'a [ChatMessage],
        semantic_model_ref: &'a str,
    ) -> BoxFuture<'a, Result<AnalystReply, AnalystError>> {
        Box::pin(self.post_message(transcript, semantic_model_ref))
    }
}

/// Parse a 2xx reply body.
pub fn parse_reply(body: &str) -> Result<AnalystReply, AnalystError> {
    let response: AnalystResponse = serde_json::from_str(body)
        .map_err(|e| AnalystError::ResponseParse(e.to_string()))?;
    Ok(response.into())
}

/// Extract the message from an error body, falling back to `Unknown error`.
pub fn parse_error_message(body: &str) -> String {
    serde_json::from_str::<AnalystErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| "Unknown error".to_string())
}
