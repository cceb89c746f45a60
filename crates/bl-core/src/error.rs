//! Error types used throughout the crate.

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading a dataset or restoring a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The dataset JSON could not be parsed.
    #[error("invalid dataset JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The dataset parsed but references something that does not exist.
    #[error("dataset validation failed: {0}")]
    Validation(String),

    /// A serialized world state snapshot could not be restored.
    #[error("corrupt snapshot: {0}")]
    Snapshot(String),
}
