use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid object name: {0}")]
    InvalidObjectName(String),

    #[error("analyst message must carry at least one content block")]
    EmptyAnalystMessage,

    #[error("missing required setting: {0}")]
    MissingSetting(String),
}
