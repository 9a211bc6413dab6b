use alertflow_model::ModelError;
use thiserror::Error;

/// Errors from the hierarchy crate.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// Includes unknown filter level names.
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("invalid filter expression '{0}': expected LEVEL=VALUE")]
    InvalidFilterExpression(String),

    #[error("invalid layout options: {0}")]
    InvalidLayout(String),

    #[error("no node labelled '{label}' at drill-down depth {depth}")]
    UnknownStageLabel { label: String, depth: usize },

    #[error("node '{0}' has no children to drill into")]
    LeafStage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type HierarchyResult<T> = Result<T, HierarchyError>;
