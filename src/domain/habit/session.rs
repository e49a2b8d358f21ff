//! Session State Entity
//!
//! Tracks one in-progress habit setup: the current stage, the accumulated
//! answers, and the context copied at creation. Owned exclusively by the
//! engine; never shared between habits or users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, StageId};

use super::answers::AnswersAccumulator;
use super::context::HabitContext;
use super::parsers;

/// Lifecycle status of a setup session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Walking through the stages.
    InProgress,
    /// All six stages answered; the habit still needs to be persisted.
    AwaitingFinalize,
    /// Habit persisted; the session is spent.
    Complete,
}

/// Complete state of one habit-setup session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    pub session_id: SessionId,
    pub context: HabitContext,
    pub current_stage: StageId,
    pub status: SessionStatus,
    pub answers: AnswersAccumulator,
    /// True while a dynamic suggestion list may still arrive for the
    /// current stage.
    pub suggestions_pending: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionState {
    /// Creates a fresh session at the first stage.
    pub fn new(context: HabitContext) -> Self {
        let now = Utc::now();
        Self {
            session_id: SessionId::new(),
            context,
            current_stage: StageId::first(),
            status: SessionStatus::InProgress,
            answers: AnswersAccumulator::new(),
            suggestions_pending: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Parses and records the answer for the current stage.
    pub fn record_answer(&mut self, raw: &str) {
        parsers::record_answer(&mut self.answers, self.current_stage, raw);
        self.updated_at = Utc::now();
    }

    /// Moves to the next stage in the fixed order, resetting the
    /// suggestion-pending flag for it.
    ///
    /// Returns the new stage, or None when the current stage is terminal.
    pub fn advance_stage(&mut self) -> Option<StageId> {
        let next = self.current_stage.next()?;
        self.current_stage = next;
        self.suggestions_pending = true;
        self.updated_at = Utc::now();
        Some(next)
    }

    /// Marks all stages answered, pending persistence.
    pub fn mark_awaiting_finalize(&mut self) {
        self.status = SessionStatus::AwaitingFinalize;
        self.suggestions_pending = false;
        self.updated_at = Utc::now();
    }

    /// Marks the session complete.
    pub fn mark_complete(&mut self) {
        self.status = SessionStatus::Complete;
        self.updated_at = Utc::now();
    }

    /// Clears the suggestion-pending flag for the current stage.
    pub fn clear_suggestions_pending(&mut self) {
        self.suggestions_pending = false;
        self.updated_at = Utc::now();
    }

    /// True while the session still accepts stage answers.
    pub fn accepts_answers(&self) -> bool {
        self.status == SessionStatus::InProgress
    }

    /// True once the terminal stage has been answered.
    pub fn is_fully_answered(&self) -> bool {
        self.answers.has_answer(StageId::Identity)
    }
}
