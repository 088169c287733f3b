use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Analyst,
}

/// One piece of a transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Suggestions {
        #[serde(rename = "suggestions")]
        options: Vec<String>,
    },
    Sql {
        statement: String,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }
}

/// A single transcript entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentBlock::text(text)],
        }
    }

    /// An analyst entry. Analyst entries always carry at least one block.
    pub fn analyst(content: Vec<ContentBlock>) -> Result<Self, CoreError> {
        if content.is_empty() {
            return Err(CoreError::EmptyAnalystMessage);
        }
        Ok(Self {
            role: Role::Analyst,
            content,
        })
    }

    pub fn analyst_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::Analyst,
            content: vec![ContentBlock::text(text)],
        }
    }

    /// Concatenated text blocks, newline separated.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
