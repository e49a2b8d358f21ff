//! Habit-formation dialogue domain.
//!
//! A session walks the user through the six stages of the Four Laws flow,
//! normalizing each free-text answer into a structured record and assembling
//! a durable habit payload at the end.

pub mod answers;
pub mod context;
pub mod engine;
pub mod errors;
pub mod parsers;
pub mod payload;
pub mod prompts;
pub mod session;

pub use answers::{
    AnswersAccumulator, AttractiveAnswer, EasyAnswer, Frequency, IdentityAnswer, ObviousAnswer,
    RewardTag, SatisfyingAnswer, ScheduleAnswer, VisualizationStyle,
};
pub use context::HabitContext;
pub use engine::{
    CompletionResult, HabitFormationEngine, StagePrompt, TaggedSuggestions, TurnOutcome,
};
pub use errors::{EngineError, SuggestionError};
pub use payload::FinalHabitPayload;
pub use prompts::{Suggestion, SuggestionUpdate};
pub use session::{SessionState, SessionStatus};
