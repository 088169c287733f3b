use thiserror::Error;

#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error("warehouse unreachable: {0}")]
    Connection(String),

    #[error("SQL error {code}: {message}")]
    Query { code: String, message: String },

    #[error("not found: {what}")]
    NotFound { what: String },

    #[error("warehouse API error: {0}")]
    Api(String),

    #[error("statement rejected: {0}")]
    Rejected(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error(transparent)]
    Core(#[from] claimlens_core::error::CoreError),
}

impl WarehouseError {
    /// Whether the failure means the warehouse could not be reached at all.
    pub fn is_connection(&self) -> bool {
        matches!(self, WarehouseError::Connection(_))
    }
}
