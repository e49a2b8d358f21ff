//! Habit Formation Engine
//!
//! Drives one habit-setup session through the six fixed stages: generates
//! each stage's prompt, normalizes the answer, and hands the assembled habit
//! to the persistence capability at the end.
//!
//! The engine performs no I/O of its own; it only invokes the two injected
//! capabilities. Suggestion generation never blocks advancement: every prompt
//! carries the static fallback list immediately, and a generated list is
//! applied later only if the session is still on the stage it was requested
//! for.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::foundation::{FamilyId, HabitId, StageId, UserId};
use crate::ports::{HabitPersister, SuggestionGenerator};

use super::answers::AnswersAccumulator;
use super::context::HabitContext;
use super::errors::{EngineError, SuggestionError};
use super::payload::{self, FinalHabitPayload};
use super::prompts::{self, Suggestion, SuggestionUpdate};
use super::session::{SessionState, SessionStatus};

/// What the host renders for one stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StagePrompt {
    pub stage: StageId,
    pub text: String,
    pub suggestions: Vec<Suggestion>,
    /// True while a dynamically generated list may still replace
    /// `suggestions` for this stage.
    pub suggestions_pending: bool,
}

/// Reported once the habit has been durably created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    pub habit_id: HabitId,
    pub confirmation_text: String,
}

/// Result of one `advance` turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The flow moved to the next stage.
    Prompt(StagePrompt),
    /// The terminal stage was answered and the habit was persisted.
    Complete(CompletionResult),
}

/// A generator response tagged with the stage it was requested for.
///
/// The tag is the sole ordering mechanism: `apply_suggestions` discards any
/// response whose tag no longer matches the current stage.
#[derive(Debug)]
pub struct TaggedSuggestions {
    stage: StageId,
    response: Result<Value, SuggestionError>,
}

impl TaggedSuggestions {
    /// Returns the stage this response was requested for.
    pub fn stage(&self) -> StageId {
        self.stage
    }
}

/// The guided habit-formation dialogue engine.
pub struct HabitFormationEngine {
    suggestion_generator: Arc<dyn SuggestionGenerator>,
    persister: Arc<dyn HabitPersister>,
    family_id: FamilyId,
    user_id: UserId,
    session: Option<SessionState>,
}

impl HabitFormationEngine {
    /// Creates an engine for one family member.
    pub fn new(
        suggestion_generator: Arc<dyn SuggestionGenerator>,
        persister: Arc<dyn HabitPersister>,
        family_id: FamilyId,
        user_id: UserId,
    ) -> Self {
        Self {
            suggestion_generator,
            persister,
            family_id,
            user_id,
            session: None,
        }
    }

    /// Starts a setup session for the given habit.
    ///
    /// Rejects synchronously if the context has no title. Starting while a
    /// session is active discards it; an explicit restart is the only way to
    /// revisit stages.
    pub fn start(&mut self, context: HabitContext) -> Result<StagePrompt, EngineError> {
        context.validate()?;

        if self.session.is_some() {
            debug!("restarting habit setup; discarding previous session");
        }

        let session = SessionState::new(context);
        let prompt = Self::prompt_for(&session);
        self.session = Some(session);
        Ok(prompt)
    }

    /// Processes the user's answer to the current stage.
    ///
    /// Returns the next stage's prompt, or the completion result once the
    /// terminal stage is answered. If persistence fails the accumulated
    /// answers are retained and a further `advance` (or [`finalize`]) retries
    /// with an identical payload.
    ///
    /// [`finalize`]: HabitFormationEngine::finalize
    pub async fn advance(&mut self, raw_answer: &str) -> Result<TurnOutcome, EngineError> {
        let status = self
            .session
            .as_ref()
            .ok_or(EngineError::NoActiveSession)?
            .status;

        match status {
            SessionStatus::Complete => Err(EngineError::SessionCompleted),
            SessionStatus::AwaitingFinalize => {
                // The answer was already recorded; this turn just retries
                // persistence.
                Ok(TurnOutcome::Complete(self.finalize().await?))
            }
            SessionStatus::InProgress => {
                let at_terminal = match self.session.as_mut() {
                    Some(session) => {
                        session.record_answer(raw_answer);
                        session.current_stage.is_terminal()
                    }
                    None => return Err(EngineError::NoActiveSession),
                };

                if at_terminal {
                    if let Some(session) = self.session.as_mut() {
                        session.mark_awaiting_finalize();
                    }
                    Ok(TurnOutcome::Complete(self.finalize().await?))
                } else {
                    match self.session.as_mut() {
                        Some(session) => {
                            session.advance_stage();
                            Ok(TurnOutcome::Prompt(Self::prompt_for(session)))
                        }
                        None => Err(EngineError::NoActiveSession),
                    }
                }
            }
        }
    }

    /// Assembles the final payload and hands it to the persister.
    ///
    /// One-shot per call; on failure the session stays intact so the host can
    /// retry without re-asking any stage.
    pub async fn finalize(&mut self) -> Result<CompletionResult, EngineError> {
        let payload = {
            let session = self.session.as_ref().ok_or(EngineError::NoActiveSession)?;
            if !session.is_fully_answered() {
                return Err(EngineError::NotReadyToFinalize(session.current_stage));
            }
            payload::assemble(session)
        };

        match self
            .persister
            .create(&payload, self.family_id, self.user_id)
            .await
        {
            Ok(persisted) => {
                debug!(habit_id = %persisted.habit_id, "habit persisted; session complete");
                if let Some(session) = self.session.as_mut() {
                    session.mark_complete();
                }
                // The session holds no external resources; drop it.
                self.session = None;
                Ok(CompletionResult {
                    habit_id: persisted.habit_id,
                    confirmation_text: persisted.message,
                })
            }
            Err(error) => {
                warn!(%error, "habit persistence failed; answers retained for retry");
                Err(EngineError::Persistence(error.to_string()))
            }
        }
    }

    /// Builds the final payload without persisting it.
    pub fn pending_payload(&self) -> Result<FinalHabitPayload, EngineError> {
        let session = self.session.as_ref().ok_or(EngineError::NoActiveSession)?;
        if !session.is_fully_answered() {
            return Err(EngineError::NotReadyToFinalize(session.current_stage));
        }
        Ok(payload::assemble(session))
    }

    /// Calls the suggestion capability for the current stage, tagging the
    /// response with that stage.
    ///
    /// The call may suspend; by the time it resolves the session may have
    /// moved on, which `apply_suggestions` detects via the tag.
    pub async fn generate_suggestions(&self) -> Result<TaggedSuggestions, EngineError> {
        let session = self.session.as_ref().ok_or(EngineError::NoActiveSession)?;
        let stage = session.current_stage;
        let response = self
            .suggestion_generator
            .generate(stage, &session.context, &session.answers)
            .await;

        Ok(TaggedSuggestions { stage, response })
    }

    /// Applies a tagged generator response to the session.
    ///
    /// Stale responses (tag no longer current) are discarded silently.
    /// Malformed or failed responses leave the static fallback in place and
    /// permanently clear the pending flag for the stage. Neither case is a
    /// user-visible error.
    pub fn apply_suggestions(&mut self, tagged: TaggedSuggestions) -> SuggestionUpdate {
        let session = match self.session.as_mut() {
            Some(session) => session,
            None => {
                debug!(stage = ?tagged.stage, "discarding suggestions; no active session");
                return SuggestionUpdate::Stale;
            }
        };

        if tagged.stage != session.current_stage || !session.accepts_answers() {
            debug!(
                requested = ?tagged.stage,
                current = ?session.current_stage,
                "discarding stale suggestion response"
            );
            return SuggestionUpdate::Stale;
        }

        match tagged
            .response
            .and_then(|value| prompts::validate_generated(&value))
        {
            Ok(chips) => {
                session.clear_suggestions_pending();
                debug!(stage = ?tagged.stage, count = chips.len(), "applied generated suggestions");
                SuggestionUpdate::Applied(chips)
            }
            Err(error) => {
                session.clear_suggestions_pending();
                warn!(stage = ?tagged.stage, %error, "keeping static suggestions");
                SuggestionUpdate::RejectedMalformed
            }
        }
    }

    /// Read-only snapshot of the accumulated answers, for host display.
    pub fn current_answers(&self) -> Option<&AnswersAccumulator> {
        self.session.as_ref().map(|s| &s.answers)
    }

    /// The current stage, if a session is active.
    pub fn current_stage(&self) -> Option<StageId> {
        self.session.as_ref().map(|s| s.current_stage)
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// Rebuilds the prompt for the current stage (fallback suggestions).
    pub fn current_prompt(&self) -> Option<StagePrompt> {
        self.session.as_ref().map(Self::prompt_for)
    }

    fn prompt_for(session: &SessionState) -> StagePrompt {
        StagePrompt {
            stage: session.current_stage,
            text: prompts::prompt_text(session.current_stage, &session.context, &session.answers),
            suggestions: prompts::fallback_suggestions(session.current_stage, &session.context),
            suggestions_pending: session.suggestions_pending,
        }
    }
}
