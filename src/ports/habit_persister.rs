//! Habit Persister Port
//!
//! Creates the durable habit record (and any reminder scheduling the host
//! supports) from the finalized payload.

use async_trait::async_trait;

use crate::domain::foundation::{FamilyId, HabitId, UserId};
use crate::domain::habit::FinalHabitPayload;

/// Successful persistence result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedHabit {
    pub habit_id: HabitId,
    /// Host-supplied confirmation text, suitable for direct display.
    pub message: String,
}

/// Persistence failures; surfaced to the host as recoverable.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum PersistError {
    #[error("Habit store rejected the payload: {0}")]
    Rejected(String),

    #[error("Habit store unavailable: {0}")]
    Unavailable(String),
}

/// Port for durable habit creation.
#[async_trait]
pub trait HabitPersister: Send + Sync {
    /// Create a habit record for the given family member.
    ///
    /// One-shot: the engine never retries on its own. On failure the session's
    /// answers are retained so finalization can be re-attempted.
    ///
    /// # Errors
    /// Returns `PersistError` if the record could not be created.
    async fn create(
        &self,
        payload: &FinalHabitPayload,
        family_id: FamilyId,
        user_id: UserId,
    ) -> Result<PersistedHabit, PersistError>;
}
