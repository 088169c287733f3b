//! The chat transcript and its two-state machine.
//!
//! ```text
//!            submit(user text)
//!   Idle ───────────────────────▶ AwaitingAnalystReply
//!    ▲                                     │
//!    └──────── complete(reply | error) ────┘
//! ```
//!
//! The machine is awaiting a reply exactly when the last transcript entry was
//! written by the user. Every completion appends exactly one analyst entry,
//! including on failure, so the machine never stalls. A reset clears the
//! transcript and bumps the epoch; a completion carrying a stale epoch is
//! discarded.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use claimlens_analyst::client::AnalystService;
use claimlens_analyst::error::AnalystError;
use claimlens_analyst::wire::AnalystReply;
use claimlens_core::models::chat::{ChatMessage, Role};

pub const EMPTY_REPLY: &str = "Sorry, I received an empty response.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    Idle,
    AwaitingAnalystReply,
}

/// A user turn waiting to be sent, tagged with the epoch it belongs to.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    pub epoch: u64,
    pub transcript: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    transcript: Vec<ChatMessage>,
    epoch: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn state(&self) -> ConversationState {
        match self.transcript.last() {
            Some(msg) if msg.role == Role::User => ConversationState::AwaitingAnalystReply,
            _ => ConversationState::Idle,
        }
    }

    /// Append a user message. Blank input is ignored, as is input while a
    /// reply is still outstanding. Returns whether a message was appended.
    pub fn submit(&mut self, text: &str) -> bool {
        if text.trim().is_empty() || self.state() == ConversationState::AwaitingAnalystReply {
            return false;
        }
        self.transcript.push(ChatMessage::user(text));
        true
    }

    /// Drop the transcript. Any reply still in flight for the old epoch will
    /// be discarded on arrival.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.epoch += 1;
    }

    pub fn pending(&self) -> Option<PendingTurn> {
        (self.state() == ConversationState::AwaitingAnalystReply).then(|| PendingTurn {
            epoch: self.epoch,
            transcript: self.transcript.clone(),
        })
    }

    /// Merge the outcome of an analyst call into the transcript.
    ///
    /// Returns `false` (and changes nothing) if the reply belongs to an
    /// earlier epoch or nothing is awaiting a reply.
    pub fn complete(&mut self, epoch: u64, outcome: Result<AnalystReply, AnalystError>) -> bool {
        if epoch != self.epoch || self.state() != ConversationState::AwaitingAnalystReply {
            warn!(epoch, current = self.epoch, "discarding stale analyst reply");
            return false;
        }

        let message = match outcome {
            Ok(reply) => ChatMessage::analyst(reply.content)
                .unwrap_or_else(|_| ChatMessage::analyst_text(EMPTY_REPLY)),
            Err(e) => ChatMessage::analyst_text(e.detail().to_string()),
        };
        self.transcript.push(message);
        true
    }

    /// One evaluation pass: if a user turn is pending, send the transcript
    /// and append the reply. Blocks until the analyst answers or fails.
    pub async fn settle(&mut self, analyst: &dyn AnalystService, semantic_model_ref: &str) {
        let Some(turn) = self.pending() else {
            return;
        };

        info!(epoch = turn.epoch, messages = turn.transcript.len(), "awaiting analyst reply");
        let outcome = analyst.send(&turn.transcript, semantic_model_ref).await;
        if let Err(e) = &outcome {
            warn!(error = %e, "analyst call failed");
        }
        self.complete(turn.epoch, outcome);
    }
}
