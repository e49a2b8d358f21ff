//! Habit persister adapters.

mod in_memory_persister;

pub use in_memory_persister::{InMemoryHabitPersister, StoredHabit};
