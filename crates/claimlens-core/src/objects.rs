//! Fully qualified warehouse object names and service constants.
//!
//! Pure string functions with no network dependency. These define the tables,
//! stage, and semantic models the dashboard reads from. Object names cannot be
//! bound as statement parameters, so anything spliced into statement text goes
//! through [`validate_object_name`] first.

use std::time::Duration;

use crate::error::CoreError;

pub const CLAIMS_TABLE: &str = "INS_CO.LOSS_CLAIMS.CLAIMS";

pub const CLAIM_LINES_TABLE: &str = "INS_CO.LOSS_CLAIMS.CLAIM_LINES";

pub const CLAIM_NOTES_TABLE: &str = "INS_CO.LOSS_CLAIMS.PARSED_CLAIM_NOTES";

pub const EVIDENCE_STAGE: &str = "INS_CO.LOSS_CLAIMS.LOSS_EVIDENCE";

/// Semantic model files the analyst can be pointed at. The first entry is the
/// session default.
pub const SEMANTIC_MODELS: &[&str] = &["INS_CO.LOSS_CLAIMS.LOSS_EVIDENCE/loss_claims.yaml"];

pub const ANALYST_ENDPOINT: &str = "/api/v2/cortex/analyst/message";

pub const ANALYST_TIMEOUT: Duration = Duration::from_secs(60);

pub const STATEMENTS_ENDPOINT: &str = "/api/v2/statements";

/// Multimodal model used for evidence image summaries.
pub const IMAGE_SUMMARY_MODEL: &str = "claude-3-5-sonnet";

pub const IMAGE_SUMMARY_PROMPT: &str =
    "Summarize the key insights from the attached image in 100 words.";

/// Expiry for memoized claim and stage lookups.
pub const LOOKUP_TTL: Duration = Duration::from_secs(60 * 60);

/// Entry limit for each memoized claim and stage lookup.
pub const LOOKUP_CACHE_ENTRIES: u64 = 10_000;

/// Byte budget for downloaded evidence files kept in memory.
pub const EVIDENCE_CACHE_BYTES: u64 = 256 * 1024 * 1024;

/// Sessions untouched for this long are dropped.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(2 * 60 * 60);

/// Upper bound on concurrently live sessions.
pub const MAX_SESSIONS: u64 = 1_000;

/// Lifetime of presigned evidence download URLs, in seconds.
pub const PRESIGNED_URL_TTL_SECS: u32 = 3600;

/// Column names of the claim tables.
pub mod column {
    pub const CLAIM_NO: &str = "CLAIM_NO";
    pub const LINE_OF_BUSINESS: &str = "LINE_OF_BUSINESS";
    pub const CLAIM_STATUS: &str = "CLAIM_STATUS";
    pub const CAUSE_OF_LOSS: &str = "CAUSE_OF_LOSS";
    pub const LOSS_DESCRIPTION: &str = "LOSS_DESCRIPTION";
    pub const EXTRACTED_CONTENT: &str = "EXTRACTED_CONTENT";
}

/// Stage reference as used in statement text, e.g. `@DB.SCHEMA.STAGE`.
pub fn stage_ref(stage: &str) -> String {
    format!("@{stage}")
}

/// Semantic model reference as the analyst expects it, e.g.
/// `@DB.SCHEMA.STAGE/model.yaml`.
pub fn semantic_model_ref(path: &str) -> String {
    format!("@{path}")
}

/// Check that `name` is a dotted sequence of plain identifiers
/// (`[A-Za-z_][A-Za-z0-9_$]*`), so it is safe to splice into statement text.
pub fn validate_object_name(name: &str) -> Result<&str, CoreError> {
    let valid = !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
                }
                _ => false,
            }
        });

    if valid {
        Ok(name)
    } else {
        Err(CoreError::InvalidObjectName(name.to_string()))
    }
}

/// Base name of a stage listing entry: `loss_evidence/photos/a.jpg` → `a.jpg`.
pub fn base_file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
