//! Ports - capability interfaces the engine consumes.

mod habit_persister;
mod suggestion_generator;

pub use habit_persister::{HabitPersister, PersistError, PersistedHabit};
pub use suggestion_generator::SuggestionGenerator;
