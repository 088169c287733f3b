use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalystError {
    #[error("API Error (Code: {status}): {message}")]
    Api { status: u16, message: String },

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),
}

/// Status code and message of a failed analyst call, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub code: Option<u16>,
    pub message: String,
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "API Error (Code: {code}): {}", self.message),
            None => write!(
                f,
                "An unexpected error occurred during the API call: {}",
                self.message
            ),
        }
    }
}

impl AnalystError {
    pub fn detail(&self) -> ErrorDetail {
        match self {
            AnalystError::Api { status, message } => ErrorDetail {
                code: Some(*status),
                message: message.clone(),
            },
            other => ErrorDetail {
                code: None,
                message: other.to_string(),
            },
        }
    }
}
