//! User actions and the pure state transition they cause.

use serde::{Deserialize, Serialize};
use tracing::debug;

use claimlens_core::models::chat::ContentBlock;
use claimlens_core::objects::SEMANTIC_MODELS;

use crate::state::SessionState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SelectClaim { claim_no: Option<String> },
    SelectSemanticModel { path: String },
    SelectQuestion { index: usize },
    AskSelectedQuestion,
    SubmitPrompt { text: String },
    /// Click on suggestion `option` of transcript entry `message`.
    ChooseSuggestion { message: usize, option: usize },
    SelectImage { file_name: Option<String> },
    AnalyzeImage,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::SelectClaim { .. } => "select_claim",
            Event::SelectSemanticModel { .. } => "select_semantic_model",
            Event::SelectQuestion { .. } => "select_question",
            Event::AskSelectedQuestion => "ask_selected_question",
            Event::SubmitPrompt { .. } => "submit_prompt",
            Event::ChooseSuggestion { .. } => "choose_suggestion",
            Event::SelectImage { .. } => "select_image",
            Event::AnalyzeImage => "analyze_image",
        }
    }
}

/// Apply one event to the session state.
///
/// No I/O happens here. Work that needs a service (analyst replies, image
/// analysis) is left pending for the dispatcher's next pass.
pub fn reduce(state: &mut SessionState, event: Event) {
    debug!(event = event.name(), "reducing event");

    match event {
        Event::SelectClaim { claim_no } => {
            let claim_no = claim_no.filter(|c| !c.trim().is_empty());
            if claim_no != state.selected_claim {
                state.selected_claim = claim_no;
                state.audit_questions.clear();
                state.selected_question = 0;
                state.conversation.reset();
                state.query_results.clear();
                state.image.analysis = None;
                state.image.analysis_requested = false;
            }
        }
        Event::SelectSemanticModel { path } => {
            if SEMANTIC_MODELS.contains(&path.as_str()) {
                state.semantic_model = path;
            }
        }
        Event::SelectQuestion { index } => {
            if index < state.audit_questions.len() {
                state.selected_question = index;
            }
        }
        Event::AskSelectedQuestion => {
            if let Some(question) = state.audit_questions.get(state.selected_question).cloned() {
                state.conversation.submit(&question);
            }
        }
        Event::SubmitPrompt { text } => {
            if state.selected_claim.is_some() {
                state.conversation.submit(&text);
            }
        }
        Event::ChooseSuggestion { message, option } => {
            let suggestion = state
                .conversation
                .transcript()
                .get(message)
                .and_then(|msg| {
                    msg.content
                        .iter()
                        .filter_map(|block| match block {
                            ContentBlock::Suggestions { options } => Some(options),
                            _ => None,
                        })
                        .flatten()
                        .nth(option)
                })
                .cloned();
            if let Some(text) = suggestion {
                state.conversation.submit(&text);
            }
        }
        Event::SelectImage { file_name } => {
            let file_name = file_name.filter(|f| !f.is_empty());
            if file_name != state.image.selected {
                state.image.selected = file_name;
                state.image.analysis = None;
                state.image.analysis_requested = false;
            }
        }
        Event::AnalyzeImage => {
            if state.image.selected.is_some() && state.selected_claim.is_some() {
                state.image.analysis_requested = true;
            }
        }
    }
}
