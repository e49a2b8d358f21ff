//! Stage Prompts and Suggestion Chips
//!
//! Deterministic prompt templates per stage (echoing the previous answer for
//! conversational feel) and the static fallback suggestion tables used while
//! dynamic generation is pending or unavailable.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::StageId;

use super::answers::AnswersAccumulator;
use super::context::HabitContext;
use super::errors::SuggestionError;

/// Hard cap on suggestion chips shown for any stage.
pub const MAX_SUGGESTIONS: usize = 6;

/// A pre-computed short answer the user can click instead of typing.
///
/// Clicking a chip is equivalent to typing its `value`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Suggestion {
    pub id: String,
    pub label: String,
    pub value: String,
}

impl Suggestion {
    /// Creates a chip whose label doubles as its value.
    pub fn simple(id: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id: id.into(),
            label: text.clone(),
            value: text,
        }
    }
}

/// Outcome of applying a generator response to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionUpdate {
    /// The generated list replaced the fallback for the current stage.
    Applied(Vec<Suggestion>),
    /// The response was tagged for a stage that is no longer current.
    Stale,
    /// The response failed validation; the fallback list stands.
    RejectedMalformed,
}

/// Builds the deterministic prompt text for a stage.
///
/// Interpolates the habit title and, where available, echoes the previous
/// stage's answer back to the user.
pub fn prompt_text(stage: StageId, context: &HabitContext, answers: &AnswersAccumulator) -> String {
    match stage {
        StageId::Obvious => format!(
            "Let's set up \"{}\"! First, make it obvious. What will remind you to start — a time, a place, or something you already do?",
            context.title
        ),
        StageId::Attractive => {
            let cue = answers
                .obvious
                .as_ref()
                .map(|a| a.cue.as_str())
                .unwrap_or("that cue");
            format!(
                "\"{}\" — great trigger. Next, make it attractive. What could you pair \"{}\" with so you actually look forward to it?",
                cue, context.title
            )
        }
        StageId::Easy => {
            let pairing = answers
                .attractive
                .as_ref()
                .map(|a| a.pairing.as_str())
                .unwrap_or("that");
            format!(
                "Love it — {} it is. Now make it easy. What's a two-minute version of \"{}\" you could do even on your busiest day?",
                pairing, context.title
            )
        }
        StageId::Satisfying => format!(
            "Now make it satisfying. How will you celebrate right after you finish \"{}\"?",
            context.title
        ),
        StageId::Schedule => format!(
            "Almost there. When should \"{}\" happen? Tell me how often and what time.",
            context.title
        ),
        StageId::Identity => {
            let time = answers
                .schedule
                .as_ref()
                .map(|a| a.time.as_str())
                .unwrap_or("then");
            format!(
                "Perfect, I'll plan for {}. Last question: who does \"{}\" help you become? Finish the sentence: \"I am someone who...\"",
                time, context.title
            )
        }
    }
}

/// Returns the static fallback chips for a stage.
///
/// Never empty; household habits get household-flavored cues where the
/// category says so.
pub fn fallback_suggestions(stage: StageId, context: &HabitContext) -> Vec<Suggestion> {
    let household = context
        .category
        .as_deref()
        .map(|c| c.eq_ignore_ascii_case("household"))
        .unwrap_or(false);

    match stage {
        StageId::Obvious => {
            if household {
                vec![
                    Suggestion::simple("obvious-1", "Right after breakfast"),
                    Suggestion::simple("obvious-2", "When I walk past the kitchen"),
                    Suggestion::simple("obvious-3", "Before the kids' bedtime"),
                ]
            } else {
                vec![
                    Suggestion::simple("obvious-1", "Right after breakfast"),
                    Suggestion::simple("obvious-2", "When I get home from work"),
                    Suggestion::simple("obvious-3", "Before I check my phone"),
                ]
            }
        }
        StageId::Attractive => vec![
            Suggestion::simple("attractive-1", "Listen to a favorite podcast while I do it"),
            Suggestion::simple("attractive-2", "Do it together with a family member"),
            Suggestion::simple("attractive-3", "Make my favorite drink first"),
        ],
        StageId::Easy => vec![
            Suggestion::simple("easy-1", "Just do the first small step"),
            Suggestion::simple("easy-2", "Set everything out the night before"),
        ],
        StageId::Satisfying => vec![
            Suggestion::simple("satisfying-1", "Check it off my tracker"),
            Suggestion::simple("satisfying-2", "Put a sticker on the progress chart"),
            Suggestion::simple("satisfying-3", "Celebrate with a little dance"),
            Suggestion::simple("satisfying-4", "Drop a dollar in the reward jar"),
        ],
        StageId::Schedule => vec![
            Suggestion::simple("schedule-1", "Every day at 7:00 AM"),
            Suggestion::simple("schedule-2", "Weekdays at 6:30 PM"),
            Suggestion::simple("schedule-3", "Weekends at 9:00 AM"),
        ],
        StageId::Identity => vec![
            Suggestion::simple("identity-1", "I am someone who follows through"),
            Suggestion::simple("identity-2", "I am someone who shows up for my family"),
        ],
    }
}

/// Validates a raw generator response into a suggestion list.
///
/// Accepts only a JSON array of 1 to [`MAX_SUGGESTIONS`] objects, each with
/// non-empty string `label` and `value` fields. An `id` is optional and
/// assigned positionally when missing.
pub fn validate_generated(raw: &Value) -> Result<Vec<Suggestion>, SuggestionError> {
    let items = raw
        .as_array()
        .ok_or_else(|| SuggestionError::MalformedResponse("expected a JSON array".to_string()))?;

    if items.is_empty() {
        return Err(SuggestionError::MalformedResponse(
            "empty suggestion list".to_string(),
        ));
    }
    if items.len() > MAX_SUGGESTIONS {
        return Err(SuggestionError::MalformedResponse(format!(
            "{} suggestions exceeds cap of {}",
            items.len(),
            MAX_SUGGESTIONS
        )));
    }

    let mut suggestions = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let label = item
            .get("label")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                SuggestionError::MalformedResponse(format!("entry {} missing label", index))
            })?;
        let value = item
            .get("value")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                SuggestionError::MalformedResponse(format!("entry {} missing value", index))
            })?;
        let id = item
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("gen-{}", index + 1));

        suggestions.push(Suggestion {
            id,
            label: label.to_string(),
            value: value.to_string(),
        });
    }

    Ok(suggestions)
}
