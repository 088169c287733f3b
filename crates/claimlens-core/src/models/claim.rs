use serde::{Deserialize, Serialize};

/// Read-only projection of one claim row and its parsed notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub claim_no: String,
    pub line_of_business: Option<String>,
    pub status: Option<String>,
    pub cause_of_loss: Option<String>,
    pub loss_description: Option<String>,
    pub notes: Vec<String>,
}

/// Result of a claim lookup.
///
/// A lookup for an unknown claim number is not an error: it yields a record
/// carrying only the requested claim number with `found == false` and no
/// audit questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimDetails {
    pub record: ClaimRecord,
    pub found: bool,
    pub audit_questions: Vec<String>,
}

impl ClaimDetails {
    pub fn not_found(claim_no: &str) -> Self {
        Self {
            record: ClaimRecord {
                claim_no: claim_no.to_string(),
                ..ClaimRecord::default()
            },
            found: false,
            audit_questions: Vec::new(),
        }
    }

    /// Loss description, if present and not blank.
    pub fn loss_description(&self) -> Option<&str> {
        self.record
            .loss_description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }
}
