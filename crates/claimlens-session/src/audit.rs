use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// A structured record of an auditor action.
///
/// Emitted through `tracing` so the trail lands wherever the subscriber
/// ships logs.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub session_id: Uuid,
    pub claim_no: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: impl Into<String>, session_id: Uuid, claim_no: Option<&str>) -> Self {
        Self {
            action: action.into(),
            session_id,
            claim_no: claim_no.map(str::to_string),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = %self.action,
            audit.session_id = %self.session_id,
            audit.claim_no = self.claim_no.as_deref().unwrap_or("-"),
            audit.details = %details,
            "audit event"
        );
    }
}
