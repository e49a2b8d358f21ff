//! Suggestion generator adapters.

mod mock_generator;
mod static_generator;

pub use mock_generator::{MockSuggestionGenerator, ScriptedResponse};
pub use static_generator::StaticSuggestionGenerator;
