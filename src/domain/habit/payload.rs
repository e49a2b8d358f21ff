//! Final Habit Payload
//!
//! Pure assembly of the habit-creation payload from a session. Assembly is a
//! function of (context, answers, session metadata) only, so retrying a
//! failed finalization produces an identical payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionId;

use super::answers::{RewardTag, ScheduleAnswer, VisualizationStyle};
use super::parsers;
use super::session::SessionState;

/// Everything the persistence capability needs to create a durable habit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinalHabitPayload {
    pub session_id: SessionId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub duration_minutes: u32,
    pub cue: String,
    pub pairing: String,
    pub two_minute: String,
    pub two_minute_duration: u32,
    pub reward_tags: Vec<RewardTag>,
    pub reward_text: String,
    pub schedule: ScheduleAnswer,
    pub identity_statement: String,
    pub kids_help: bool,
    pub visualization_style: VisualizationStyle,
    pub sms_reminders_enabled: bool,
    pub created_at: DateTime<Utc>,
}

/// Assembles the payload from a session.
///
/// Stages are always answered in order before finalization, but each slot is
/// still defaulted through its parser on an empty answer so a gap cannot
/// poison the payload.
pub fn assemble(session: &SessionState) -> FinalHabitPayload {
    let answers = &session.answers;

    let obvious = answers.obvious.clone().unwrap_or_else(|| parsers::parse_obvious(""));
    let attractive = answers
        .attractive
        .clone()
        .unwrap_or_else(|| parsers::parse_attractive(""));
    let easy = answers.easy.clone().unwrap_or_else(|| parsers::parse_easy(""));
    let satisfying = answers
        .satisfying
        .clone()
        .unwrap_or_else(|| parsers::parse_satisfying(""));
    let schedule = answers
        .schedule
        .clone()
        .unwrap_or_else(|| parsers::parse_schedule(""));
    let identity = answers
        .identity
        .clone()
        .unwrap_or_else(|| parsers::parse_identity(""));

    FinalHabitPayload {
        session_id: session.session_id,
        title: session.context.title.clone(),
        description: session.context.description.clone(),
        category: session.context.category.clone(),
        duration_minutes: session.context.duration_or_default(),
        cue: obvious.cue,
        pairing: attractive.pairing,
        two_minute: easy.two_minute,
        two_minute_duration: easy.duration_minutes,
        reward_tags: satisfying.reward_tags,
        reward_text: satisfying.custom_text,
        schedule,
        identity_statement: identity.statement,
        kids_help: true,
        visualization_style: VisualizationStyle::Mountain,
        sms_reminders_enabled: false,
        created_at: session.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::habit::answers::Frequency;
    use crate::domain::habit::context::HabitContext;

    fn answered_session() -> SessionState {
        let mut session = SessionState::new(
            HabitContext::new("Evening walk").with_duration_minutes(15),
        );
        session.record_answer("Put my shoes by the door");
        session.advance_stage();
        session.record_answer("Podcast time");
        session.advance_stage();
        session.record_answer("Walk to the corner");
        session.advance_stage();
        session.record_answer("check it off and dance");
        session.advance_stage();
        session.record_answer("every weekday around 7");
        session.advance_stage();
        session.record_answer("I am someone who moves every day");
        session
    }

    #[test]
    fn test_assemble_carries_all_answers() {
        let payload = assemble(&answered_session());

        assert_eq!(payload.title, "Evening walk");
        assert_eq!(payload.duration_minutes, 15);
        assert_eq!(payload.cue, "Put my shoes by the door");
        assert_eq!(payload.pairing, "Podcast time");
        assert_eq!(payload.two_minute, "Walk to the corner");
        assert_eq!(payload.two_minute_duration, 2);
        assert_eq!(
            payload.reward_tags,
            vec![RewardTag::CheckOff, RewardTag::Celebrate]
        );
        assert_eq!(payload.reward_text, "check it off and dance");
        assert_eq!(payload.schedule.frequency, Frequency::Weekdays);
        assert_eq!(payload.schedule.time, "7:00 AM");
        assert_eq!(payload.identity_statement, "I am someone who moves every day");
    }

    #[test]
    fn test_assemble_applies_fixed_defaults() {
        let payload = assemble(&answered_session());

        assert!(payload.kids_help);
        assert_eq!(payload.visualization_style, VisualizationStyle::Mountain);
        assert!(!payload.sms_reminders_enabled);
    }

    #[test]
    fn test_assemble_is_deterministic_for_same_session() {
        let session = answered_session();

        assert_eq!(assemble(&session), assemble(&session));
    }

    #[test]
    fn test_assemble_defaults_absent_stages() {
        // Defensive path: a bare session still yields a well-formed payload
        let session = SessionState::new(HabitContext::new("Evening walk"));
        let payload = assemble(&session);

        assert_eq!(payload.reward_tags, vec![RewardTag::CheckOff]);
        assert_eq!(payload.schedule.frequency, Frequency::Daily);
        assert_eq!(payload.schedule.time, "9:00 AM");
        assert_eq!(payload.duration_minutes, 10);
        assert!(payload.cue.is_empty());
    }
}
