//! Error types for the habit dialogue domain.

use crate::domain::foundation::StageId;

/// Errors the engine surfaces to the host.
///
/// Suggestion-related failures are absorbed internally and never appear here;
/// the host always receives a usable suggestion list.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum EngineError {
    #[error("Invalid start context: {0}")]
    InvalidStartContext(String),

    #[error("No active session; call start() first")]
    NoActiveSession,

    #[error("Session already completed; start a new one")]
    SessionCompleted,

    #[error("Nothing to finalize: stage {0:?} has not been answered")]
    NotReadyToFinalize(StageId),

    #[error("Could not save the habit: {0}")]
    Persistence(String),
}

/// Failures from the suggestion-generation capability.
///
/// Always recovered locally by falling back to the static list.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum SuggestionError {
    #[error("Suggestion generation failed: {0}")]
    GenerationFailed(String),

    #[error("Malformed suggestion response: {0}")]
    MalformedResponse(String),
}
