//! In-Memory Habit Persister
//!
//! Stores created habits in memory. Used by tests and by hosts that handle
//! durability themselves; supports failure injection for retry-path testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::{FamilyId, HabitId, UserId};
use crate::domain::habit::FinalHabitPayload;
use crate::ports::{HabitPersister, PersistError, PersistedHabit};

/// A habit record captured by the in-memory store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredHabit {
    pub habit_id: HabitId,
    pub family_id: FamilyId,
    pub user_id: UserId,
    pub payload: FinalHabitPayload,
}

/// In-memory implementation of the HabitPersister port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHabitPersister {
    habits: Arc<Mutex<Vec<StoredHabit>>>,
    /// Errors to inject, consumed one per call before any success.
    failures: Arc<Mutex<Vec<PersistError>>>,
}

impl InMemoryHabitPersister {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a failure for the next `create` call.
    pub fn fail_next(&self, error: PersistError) {
        self.failures.lock().expect("store lock poisoned").push(error);
    }

    /// Returns all stored habits.
    pub fn stored(&self) -> Vec<StoredHabit> {
        self.habits.lock().expect("store lock poisoned").clone()
    }

    /// Returns the number of stored habits.
    pub fn count(&self) -> usize {
        self.habits.lock().expect("store lock poisoned").len()
    }
}

#[async_trait]
impl HabitPersister for InMemoryHabitPersister {
    async fn create(
        &self,
        payload: &FinalHabitPayload,
        family_id: FamilyId,
        user_id: UserId,
    ) -> Result<PersistedHabit, PersistError> {
        if let Some(error) = self.failures.lock().expect("store lock poisoned").pop() {
            return Err(error);
        }

        let habit_id = HabitId::new();
        let message = format!("Habit \"{}\" is all set!", payload.title);

        self.habits
            .lock()
            .expect("store lock poisoned")
            .push(StoredHabit {
                habit_id,
                family_id,
                user_id,
                payload: payload.clone(),
            });

        Ok(PersistedHabit { habit_id, message })
    }
}
