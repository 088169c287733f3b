//! Runs one evaluation pass per user event.
//!
//! The reducer records intent; the pass performs whatever blocking service
//! calls that intent requires before control returns to the caller.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, instrument, warn};

use claimlens_analyst::client::AnalystService;
use claimlens_core::objects::EVIDENCE_STAGE;
use claimlens_warehouse::access::ClaimData;
use claimlens_warehouse::cortex::NO_SUMMARY;

use crate::audit::AuditEvent;
use crate::event::{reduce, Event};
use crate::state::{ImageAnalysis, SessionState};

pub const SUMMARY_FAILED: &str = "An error occurred during summary generation.";
pub const SIMILARITY_NEEDS_BOTH: &str =
    "Both an image summary and a claim description are needed to calculate a similarity score.";

pub struct Dispatcher {
    data: Arc<ClaimData>,
    analyst: Arc<dyn AnalystService>,
}

impl Dispatcher {
    pub fn new(data: Arc<ClaimData>, analyst: Arc<dyn AnalystService>) -> Self {
        Self { data, analyst }
    }

    pub fn data(&self) -> &ClaimData {
        &self.data
    }

    /// Apply `event` and run the pass it schedules.
    #[instrument(skip_all, fields(session_id = %state.id, event = event.name()))]
    pub async fn dispatch(&self, state: &mut SessionState, event: Event) {
        let action = event.name();
        reduce(state, event);
        AuditEvent::new(action, state.id, state.selected_claim.as_deref()).emit();
        self.run_pass(state).await;
    }

    /// Settle everything left pending in `state`.
    pub async fn run_pass(&self, state: &mut SessionState) {
        state.audit_questions = self.audit_questions(state.selected_claim.as_deref()).await;

        let model_ref = state.semantic_model_ref();
        state
            .conversation
            .settle(self.analyst.as_ref(), &model_ref)
            .await;

        if state.image.analysis_requested {
            state.image.analysis_requested = false;
            state.image.analysis = self.analyze_image(state).await;
        }
    }

    /// Questions offered for the selected claim. Unknown claims, and claims
    /// whose lookup failed, get none.
    async fn audit_questions(&self, claim_no: Option<&str>) -> Vec<String> {
        let Some(claim_no) = claim_no else {
            return Vec::new();
        };
        match self.data.get_claim_details(claim_no).await {
            Ok(details) => details.audit_questions,
            Err(e) => {
                warn!(error = %e, claim_no, "claim lookup failed, no questions offered");
                Vec::new()
            }
        }
    }

    async fn analyze_image(&self, state: &SessionState) -> Option<ImageAnalysis> {
        let file_name = state.image.selected.clone()?;
        let claim_no = state.selected_claim.clone()?;
        let mut notices = Vec::new();

        info!(%file_name, %claim_no, "analyzing evidence image");

        // A failed call reports its own notice; similarity stays silent then.
        let mut lookup_failed = false;

        let summary = match self.data.summarize_image(EVIDENCE_STAGE, &file_name).await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                warn!(error = %e, %file_name, "image summary failed");
                notices.push(format!("Error generating image summary: {e}"));
                lookup_failed = true;
                Err(())
            }
        };

        let claim_description = match self.data.get_claim_details(&claim_no).await {
            Ok(details) => details.loss_description().map(str::to_string),
            Err(e) => {
                warn!(error = %e, %claim_no, "claim lookup failed");
                notices.push(format!("Error fetching claim details: {e}"));
                lookup_failed = true;
                None
            }
        };

        let similarity = match (&claim_description, &summary) {
            (Some(description), Ok(Some(summary))) => {
                match self.data.similarity(description, summary).await {
                    Ok(score) => score,
                    Err(e) => {
                        warn!(error = %e, "similarity scoring failed");
                        notices.push(format!("Error calculating similarity score: {e}"));
                        None
                    }
                }
            }
            _ if lookup_failed => None,
            _ => {
                notices.push(SIMILARITY_NEEDS_BOTH.to_string());
                None
            }
        };

        AuditEvent::new("analyze_image_completed", state.id, Some(&claim_no))
            .with_details(json!({
                "file_name": file_name,
                "summarized": matches!(summary, Ok(Some(_))),
                "similarity": similarity,
            }))
            .emit();

        Some(ImageAnalysis {
            file_name,
            claim_no,
            summary: match summary {
                Ok(Some(summary)) => summary,
                Ok(None) => NO_SUMMARY.to_string(),
                Err(()) => SUMMARY_FAILED.to_string(),
            },
            claim_description,
            similarity,
            notices,
        })
    }
}
