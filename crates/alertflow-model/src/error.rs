use thiserror::Error;

/// Errors raised at the model boundary.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A caller referenced a level name that is not one of the six hierarchy levels.
    #[error("unknown hierarchy level '{0}'")]
    UnknownLevel(String),

    #[error("unknown record field '{0}'")]
    UnknownField(String),

    #[error("invalid level order: {0}")]
    InvalidLevelOrder(String),

    /// A raw imported row could not be coerced into a record.
    #[error("import error: {0}")]
    Import(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;
