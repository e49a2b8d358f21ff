//! Habit Context Value Object
//!
//! Supplied once at session start and copied into the session; immutable
//! for the life of the flow.

use serde::{Deserialize, Serialize};

use super::errors::EngineError;

/// Default habit duration when the host does not supply one.
pub const DEFAULT_DURATION_MINUTES: u32 = 10;

/// The habit being set up, as described by the host before the flow begins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HabitContext {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub duration_minutes: Option<u32>,
}

impl HabitContext {
    /// Creates a context with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            category: None,
            duration_minutes: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the duration in minutes.
    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Validates the one hard precondition the engine enforces: a non-empty title.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.title.trim().is_empty() {
            return Err(EngineError::InvalidStartContext(
                "habit title must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the duration, falling back to the default.
    pub fn duration_or_default(&self) -> u32 {
        self.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES)
    }
}
