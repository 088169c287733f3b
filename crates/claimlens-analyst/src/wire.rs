//! Wire format of the analyst message endpoint.
//!
//! Request: `{ "messages": [...], "semantic_model_file": "@stage/model.yaml" }`.
//! Reply: `{ "message": { "role": "analyst", "content": [...] }, "request_id": ... }`.
//! Content blocks are tagged by `type`; block types this client does not
//! render are dropped on the way in.

use serde::{Deserialize, Serialize};

use claimlens_core::models::chat::{ChatMessage, ContentBlock, Role};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalystRequest {
    pub messages: Vec<WireMessage>,
    pub semantic_model_file: String,
}

impl AnalystRequest {
    pub fn new(transcript: &[ChatMessage], semantic_model_ref: &str) -> Self {
        Self {
            messages: transcript.iter().map(WireMessage::from).collect(),
            semantic_model_file: semantic_model_ref.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    #[serde(default)]
    pub content: Vec<WireContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireContent {
    Text {
        text: String,
    },
    Suggestions {
        #[serde(default)]
        suggestions: Vec<String>,
    },
    Sql {
        statement: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        confidence: Option<serde_json::Value>,
    },
    #[serde(other, skip_serializing)]
    Unsupported,
}

impl From<&ChatMessage> for WireMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role,
            content: msg.content.iter().map(WireContent::from).collect(),
        }
    }
}

impl From<&ContentBlock> for WireContent {
    fn from(block: &ContentBlock) -> Self {
        match block {
            ContentBlock::Text { text } => WireContent::Text { text: text.clone() },
            ContentBlock::Suggestions { options } => WireContent::Suggestions {
                suggestions: options.clone(),
            },
            ContentBlock::Sql { statement } => WireContent::Sql {
                statement: statement.clone(),
                confidence: None,
            },
        }
    }
}

impl WireContent {
    fn into_block(self) -> Option<ContentBlock> {
        match self {
            WireContent::Text { text } => Some(ContentBlock::Text { text }),
            WireContent::Suggestions { suggestions } => Some(ContentBlock::Suggestions {
                options: suggestions,
            }),
            WireContent::Sql { statement, .. } => Some(ContentBlock::Sql { statement }),
            WireContent::Unsupported => None,
        }
    }
}

impl WireMessage {
    /// Content blocks this client can render, in reply order.
    pub fn into_blocks(self) -> Vec<ContentBlock> {
        self.content
            .into_iter()
            .filter_map(WireContent::into_block)
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalystResponse {
    pub message: WireMessage,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Warning {
    pub message: String,
}

/// Error body returned with a non-2xx status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalystErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

/// Parsed analyst reply.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalystReply {
    pub content: Vec<ContentBlock>,
    pub request_id: Option<String>,
    pub warnings: Vec<String>,
}

impl From<AnalystResponse> for AnalystReply {
    fn from(resp: AnalystResponse) -> Self {
        Self {
            content: resp.message.into_blocks(),
            request_id: resp.request_id,
            warnings: resp.warnings.into_iter().map(|w| w.message).collect(),
        }
    }
}
