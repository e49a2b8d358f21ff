//! Static Suggestion Generator
//!
//! Serves the built-in fallback tables through the generator port, letting a
//! host run the full flow without any LLM capability wired in.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::StageId;
use crate::domain::habit::{prompts, AnswersAccumulator, HabitContext, SuggestionError};
use crate::ports::SuggestionGenerator;

/// Generator that always returns the static fallback chips for the stage.
#[derive(Debug, Clone, Default)]
pub struct StaticSuggestionGenerator;

impl StaticSuggestionGenerator {
    /// Creates a new static generator.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SuggestionGenerator for StaticSuggestionGenerator {
    async fn generate(
        &self,
        stage: StageId,
        context: &HabitContext,
        _answers: &AnswersAccumulator,
    ) -> Result<Value, SuggestionError> {
        let chips = prompts::fallback_suggestions(stage, context);
        serde_json::to_value(chips)
            .map_err(|e| SuggestionError::GenerationFailed(e.to_string()))
    }
}
