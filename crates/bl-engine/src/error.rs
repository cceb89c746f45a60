//! Error types for the engine crate.

/// Alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Faults the engine can hit outside normal narration flow.
///
/// Player mistakes are never errors; they come back as narration from
/// [`crate::GameSession::process`]. These variants cover dataset and
/// persistence faults only.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A dataset or snapshot fault from the core crate.
    #[error(transparent)]
    Core(#[from] bl_core::CoreError),

    /// The save gateway rejected a write.
    #[error("save failed: {0}")]
    SaveFailed(String),

    /// The save gateway rejected a read.
    #[error("load failed: {0}")]
    LoadFailed(String),

    /// The save gateway has no stored snapshot.
    #[error("no saved game")]
    NoSavedGame,
}
