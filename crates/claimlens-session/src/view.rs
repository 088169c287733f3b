//! The view model derived from session state on every pass.
//!
//! Data failures never abort a render: each panel carries its own inline
//! error string instead.

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use claimlens_core::models::chat::{ContentBlock, Role};
use claimlens_core::models::claim::ClaimDetails;
use claimlens_core::models::table::Table;
use claimlens_core::objects::{stage_ref, EVIDENCE_STAGE, SEMANTIC_MODELS};
use claimlens_warehouse::access::ClaimData;
use claimlens_warehouse::error::WarehouseError;

use crate::conversation::ConversationState;
use crate::state::{ImageAnalysis, SessionState};

pub const SELECT_CLAIM_PROMPT: &str = "Please select a claim number to begin the audit.";
pub const SELECT_CLAIM_FOR_IMAGE: &str =
    "Please select a claim from the 'Claims Audit & Chat' tab to compare against the image.";
pub const NO_CLAIM_DETAILS: &str = "No main claim details found.";
pub const NO_CLAIM_NOTES: &str = "No parsed claim notes found.";
pub const EMPTY_RESULT: &str = "Query returned no data.";

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub session_id: Uuid,
    pub claims: ClaimPanel,
    pub chat: ChatPanel,
    pub images: ImagePanelView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClaimPanel {
    pub options: Vec<String>,
    pub selected: Option<String>,
    pub placeholder: Option<String>,
    /// Markdown summary of the selected claim.
    pub summary: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatPanel {
    pub semantic_models: Vec<String>,
    pub selected_model: String,
    pub questions: Vec<String>,
    pub selected_question: usize,
    pub state: ConversationState,
    pub messages: Vec<MessageView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub index: usize,
    pub role: Role,
    pub blocks: Vec<BlockView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockView {
    Text { text: String },
    Suggestions { options: Vec<SuggestionView> },
    Sql { statement: String, result: SqlResult },
}

/// A clickable suggestion; `index` is what `ChooseSuggestion.option` expects.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionView {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SqlResult {
    Table { table: Table },
    Empty { message: String },
    Error { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImagePanelView {
    pub stage: String,
    pub files: Vec<String>,
    /// Shown instead of the file picker or the analysis controls.
    pub message: Option<String>,
    pub selected: Option<String>,
    pub preview_url: Option<String>,
    pub can_analyze: bool,
    pub analysis: Option<AnalysisView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView {
    pub file_name: String,
    pub summary: String,
    pub claim_description: Option<String>,
    /// Score formatted with two decimals.
    pub similarity: Option<String>,
    pub notices: Vec<String>,
}

/// Build the dashboard for `state`. Analyst SQL that has not run yet in this
/// session runs here, once; its outcome is kept on the session.
pub async fn render(state: &mut SessionState, data: &ClaimData) -> DashboardView {
    run_pending_queries(state, data).await;
    let state = &*state;

    let details = match &state.selected_claim {
        Some(claim_no) => Some(data.get_claim_details(claim_no).await),
        None => None,
    };

    let claims = render_claims(state, data, details.as_ref()).await;
    let chat = render_chat(state);
    let images = render_images(state, data).await;

    DashboardView {
        session_id: state.id,
        claims,
        chat,
        images,
    }
}

async fn render_claims(
    state: &SessionState,
    data: &ClaimData,
    details: Option<&Result<ClaimDetails, WarehouseError>>,
) -> ClaimPanel {
    let mut errors = Vec::new();

    let options = match data.list_claim_numbers().await {
        Ok(options) => options,
        Err(e) => {
            warn!(error = %e, "listing claim numbers failed");
            errors.push(format!("Error fetching claim numbers: {e}"));
            Vec::new()
        }
    };

    let summary = match details {
        Some(Ok(details)) => Some(claim_summary_text(details)),
        Some(Err(e)) => {
            warn!(error = %e, "fetching claim details failed");
            errors.push(format!("Error fetching claim details: {e}"));
            None
        }
        None => None,
    };

    ClaimPanel {
        options,
        selected: state.selected_claim.clone(),
        placeholder: state
            .selected_claim
            .is_none()
            .then(|| SELECT_CLAIM_PROMPT.to_string()),
        summary,
        error: (!errors.is_empty()).then(|| errors.join("\n")),
    }
}

/// Markdown block describing a claim and its parsed notes.
pub fn claim_summary_text(details: &ClaimDetails) -> String {
    if !details.found {
        return NO_CLAIM_DETAILS.to_string();
    }

    let record = &details.record;
    let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());

    let mut text = format!(
        "**Claim Number:** {}\n\
         **Line of Business:** {}\n\
         **Claim Status:** {}\n\
         **Cause of Loss:** {}\n\
         **Loss Description:** {}\n\n",
        record.claim_no,
        or_na(&record.line_of_business),
        or_na(&record.status),
        or_na(&record.cause_of_loss),
        or_na(&record.loss_description),
    );

    if record.notes.is_empty() {
        text.push_str(NO_CLAIM_NOTES);
        text.push('\n');
    } else {
        text.push_str("**Claim Notes:**\n");
        for note in &record.notes {
            text.push_str(&format!("- Content: {note}\n"));
        }
    }

    text
}

fn render_chat(state: &SessionState) -> ChatPanel {
    let mut messages = Vec::with_capacity(state.conversation.len());
    for (index, message) in state.conversation.transcript().iter().enumerate() {
        let mut blocks = Vec::with_capacity(message.content.len());
        let mut suggestion_index = 0;
        for block in &message.content {
            let view = match block {
                ContentBlock::Text { text } => BlockView::Text { text: text.clone() },
                ContentBlock::Suggestions { options } => {
                    let options = options
                        .iter()
                        .map(|text| {
                            let view = SuggestionView {
                                index: suggestion_index,
                                text: text.clone(),
                            };
                            suggestion_index += 1;
                            view
                        })
                        .collect();
                    BlockView::Suggestions { options }
                }
                ContentBlock::Sql { statement } => BlockView::Sql {
                    statement: statement.clone(),
                    result: sql_result(state.query_results.get(statement)),
                },
            };
            blocks.push(view);
        }
        messages.push(MessageView {
            index,
            role: message.role,
            blocks,
        });
    }

    ChatPanel {
        semantic_models: SEMANTIC_MODELS.iter().map(|m| m.to_string()).collect(),
        selected_model: state.semantic_model.clone(),
        questions: state.audit_questions.clone(),
        selected_question: state.selected_question,
        state: state.conversation.state(),
        messages,
    }
}

async fn run_pending_queries(state: &mut SessionState, data: &ClaimData) {
    let pending: Vec<String> = state
        .conversation
        .transcript()
        .iter()
        .flat_map(|message| &message.content)
        .filter_map(|block| match block {
            ContentBlock::Sql { statement } => Some(statement),
            _ => None,
        })
        .filter(|statement| !state.query_results.contains_key(*statement))
        .cloned()
        .collect();

    for statement in pending {
        if state.query_results.contains_key(&statement) {
            continue;
        }
        let outcome = data.run_query(&statement).await.map_err(|e| {
            warn!(error = %e, "analyst SQL failed");
            e.to_string()
        });
        state.query_results.insert(statement, outcome);
    }
}

fn sql_result(outcome: Option<&Result<Table, String>>) -> SqlResult {
    match outcome {
        Some(Ok(table)) if table.is_empty() => SqlResult::Empty {
            message: EMPTY_RESULT.to_string(),
        },
        Some(Ok(table)) => SqlResult::Table {
            table: table.clone(),
        },
        Some(Err(e)) => SqlResult::Error {
            message: format!("Could not execute query: {e}"),
        },
        None => SqlResult::Empty {
            message: EMPTY_RESULT.to_string(),
        },
    }
}

async fn render_images(state: &SessionState, data: &ClaimData) -> ImagePanelView {
    let stage = stage_ref(EVIDENCE_STAGE);

    let files = match data.list_stage_files(EVIDENCE_STAGE).await {
        Ok(files) => files,
        Err(e) => {
            warn!(error = %e, "listing stage files failed");
            return ImagePanelView {
                message: Some(format!("Error listing images in stage {stage}: {e}")),
                ..ImagePanelView::empty(stage)
            };
        }
    };

    if files.is_empty() {
        return ImagePanelView {
            message: Some(format!("No image files found in stage {stage}.")),
            ..ImagePanelView::empty(stage)
        };
    }

    let selected = state
        .image
        .selected
        .clone()
        .filter(|name| files.contains(name));
    let has_claim = state.selected_claim.is_some();

    let message = (selected.is_some() && !has_claim).then(|| SELECT_CLAIM_FOR_IMAGE.to_string());
    let preview_url = selected
        .as_ref()
        .filter(|_| has_claim)
        .map(|name| format!("/images/{}", urlencoding::encode(name)));
    let analysis = state
        .image
        .analysis
        .as_ref()
        .filter(|a| Some(&a.file_name) == selected.as_ref())
        .map(analysis_view);

    ImagePanelView {
        stage,
        files,
        message,
        can_analyze: selected.is_some() && has_claim,
        selected,
        preview_url,
        analysis,
    }
}

impl ImagePanelView {
    fn empty(stage: String) -> Self {
        Self {
            stage,
            files: Vec::new(),
            message: None,
            selected: None,
            preview_url: None,
            can_analyze: false,
            analysis: None,
        }
    }
}

fn analysis_view(analysis: &ImageAnalysis) -> AnalysisView {
    AnalysisView {
        file_name: analysis.file_name.clone(),
        summary: analysis.summary.clone(),
        claim_description: analysis.claim_description.clone(),
        similarity: analysis.similarity.map(|s| format!("{s:.2}")),
        notices: analysis.notices.clone(),
    }
}
