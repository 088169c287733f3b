use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use claimlens_core::models::table::Table;
use claimlens_core::objects::{semantic_model_ref, SEMANTIC_MODELS};

use crate::conversation::Conversation;

/// Everything one browser session can see or change.
///
/// Owned by exactly one session slot and mutated only by the dispatcher while
/// it holds that slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub id: Uuid,
    pub started_at: jiff::Timestamp,
    pub selected_claim: Option<String>,
    /// Path of the semantic model file, without the leading `@`.
    pub semantic_model: String,
    /// Audit questions of the selected claim; empty until the claim has been
    /// looked up, and for claims that do not exist.
    pub audit_questions: Vec<String>,
    /// Index into `audit_questions`.
    pub selected_question: usize,
    pub conversation: Conversation,
    /// Outcome of each analyst SQL statement, keyed by statement text. A
    /// statement runs at most once per session, failures included.
    #[serde(skip)]
    pub query_results: HashMap<String, Result<Table, String>>,
    pub image: ImagePanel,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: jiff::Timestamp::now(),
            selected_claim: None,
            semantic_model: SEMANTIC_MODELS[0].to_string(),
            audit_questions: Vec::new(),
            selected_question: 0,
            conversation: Conversation::new(),
            query_results: HashMap::new(),
            image: ImagePanel::default(),
        }
    }

    pub fn semantic_model_ref(&self) -> String {
        semantic_model_ref(&self.semantic_model)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImagePanel {
    pub selected: Option<String>,
    /// Set by the reducer, cleared by the next pass once the analysis ran.
    pub analysis_requested: bool,
    pub analysis: Option<ImageAnalysis>,
}

/// AI summary of an evidence image compared against a claim's loss
/// description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub file_name: String,
    pub claim_no: String,
    pub summary: String,
    pub claim_description: Option<String>,
    pub similarity: Option<f64>,
    /// Informational or error messages shown alongside the result.
    pub notices: Vec<String>,
}
