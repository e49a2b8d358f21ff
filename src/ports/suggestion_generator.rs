//! Suggestion Generator Port
//!
//! Best-effort, possibly slow capability (typically LLM-backed) that proposes
//! suggestion chips for a stage. Advisory only: the engine always has the
//! static fallback list, so failures here never reach the user.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::StageId;
use crate::domain::habit::{AnswersAccumulator, HabitContext, SuggestionError};

/// Port for dynamic suggestion-chip generation.
#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    /// Generate suggestion chips for a stage.
    ///
    /// # Arguments
    /// * `stage` - The stage the chips are for
    /// * `context` - The habit being set up
    /// * `answers` - Answers accumulated so far
    ///
    /// # Returns
    /// Raw JSON expected to be an array of `{label, value}` objects. The
    /// engine validates the shape; returning anything else is recovered by
    /// falling back to the static list.
    ///
    /// # Errors
    /// Returns `SuggestionError` if generation fails; treated as advisory.
    async fn generate(
        &self,
        stage: StageId,
        context: &HabitContext,
        answers: &AnswersAccumulator,
    ) -> Result<Value, SuggestionError>;
}
