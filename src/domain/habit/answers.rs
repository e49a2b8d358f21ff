//! Structured Answers
//!
//! One record per stage, populated incrementally as the flow advances.
//! Every record retains the user's raw text somewhere, so normalization
//! never destroys input.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StageId;

/// Answer to the Obvious stage: the environmental cue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObviousAnswer {
    pub cue: String,
}

/// Answer to the Attractive stage: the pairing/motivation text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttractiveAnswer {
    pub pairing: String,
}

/// Answer to the Easy stage: the two-minute starter version.
///
/// `duration_minutes` is fixed at 2 regardless of what the user typed;
/// the two-minute rule is policy, not inference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EasyAnswer {
    pub two_minute: String,
    pub duration_minutes: u32,
}

/// Reward styles recognized in the Satisfying stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardTag {
    CheckOff,
    ProgressVisual,
    Celebrate,
    RewardJar,
}

impl RewardTag {
    /// Returns all tags in the order their keyword families are scanned.
    pub fn all() -> &'static [RewardTag] {
        &[
            RewardTag::CheckOff,
            RewardTag::ProgressVisual,
            RewardTag::Celebrate,
            RewardTag::RewardJar,
        ]
    }

    /// Returns the snake_case wire form.
    pub fn key(&self) -> &'static str {
        match self {
            RewardTag::CheckOff => "check_off",
            RewardTag::ProgressVisual => "progress_visual",
            RewardTag::Celebrate => "celebrate",
            RewardTag::RewardJar => "reward_jar",
        }
    }
}

/// Answer to the Satisfying stage.
///
/// `reward_tags` is never empty; `custom_text` always holds the raw answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SatisfyingAnswer {
    pub reward_tags: Vec<RewardTag>,
    pub custom_text: String,
}

/// How often the habit runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekdays,
    Weekends,
}

impl Frequency {
    /// Returns the days of week for this frequency (0 = Sunday .. 6 = Saturday).
    pub fn default_days(&self) -> Vec<u8> {
        match self {
            Frequency::Daily => vec![0, 1, 2, 3, 4, 5, 6],
            Frequency::Weekdays => vec![1, 2, 3, 4, 5],
            Frequency::Weekends => vec![0, 6],
        }
    }
}

/// Answer to the Schedule stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleAnswer {
    pub frequency: Frequency,
    /// Normalized `H:MM AM/PM` time, e.g. `"7:00 AM"`.
    pub time: String,
    /// Days of week, 0 = Sunday .. 6 = Saturday.
    pub days: Vec<u8>,
    pub raw_text: String,
}

/// Answer to the Identity stage: the identity statement, verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityAnswer {
    pub statement: String,
}

/// Progress visualization styles a host can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualizationStyle {
    Mountain,
    Garden,
    Path,
}

/// Append-only accumulator of structured answers, one slot per stage.
///
/// Entries are only ever written by the stage parsers; nothing deletes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswersAccumulator {
    pub obvious: Option<ObviousAnswer>,
    pub attractive: Option<AttractiveAnswer>,
    pub easy: Option<EasyAnswer>,
    pub satisfying: Option<SatisfyingAnswer>,
    pub schedule: Option<ScheduleAnswer>,
    pub identity: Option<IdentityAnswer>,
}

impl AnswersAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the given stage has been answered.
    pub fn has_answer(&self, stage: StageId) -> bool {
        match stage {
            StageId::Obvious => self.obvious.is_some(),
            StageId::Attractive => self.attractive.is_some(),
            StageId::Easy => self.easy.is_some(),
            StageId::Satisfying => self.satisfying.is_some(),
            StageId::Schedule => self.schedule.is_some(),
            StageId::Identity => self.identity.is_some(),
        }
    }

    /// Counts answered stages.
    pub fn answered_count(&self) -> usize {
        StageId::all().iter().filter(|s| self.has_answer(**s)).count()
    }

    /// Returns the raw text the user supplied for a stage, if answered.
    ///
    /// Every parser preserves the original input verbatim, so this is total
    /// over answered stages.
    pub fn raw_answer(&self, stage: StageId) -> Option<&str> {
        match stage {
            StageId::Obvious => self.obvious.as_ref().map(|a| a.cue.as_str()),
            StageId::Attractive => self.attractive.as_ref().map(|a| a.pairing.as_str()),
            StageId::Easy => self.easy.as_ref().map(|a| a.two_minute.as_str()),
            StageId::Satisfying => self.satisfying.as_ref().map(|a| a.custom_text.as_str()),
            StageId::Schedule => self.schedule.as_ref().map(|a| a.raw_text.as_str()),
            StageId::Identity => self.identity.as_ref().map(|a| a.statement.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_tag_keys() {
        assert_eq!(RewardTag::CheckOff.key(), "check_off");
        assert_eq!(RewardTag::ProgressVisual.key(), "progress_visual");
        assert_eq!(RewardTag::Celebrate.key(), "celebrate");
        assert_eq!(RewardTag::RewardJar.key(), "reward_jar");
    }

    #[test]
    fn test_reward_tag_serializes_snake_case() {
        let json = serde_json::to_string(&RewardTag::RewardJar).unwrap();
        assert_eq!(json, "\"reward_jar\"");
    }

    #[test]
    fn test_frequency_default_days() {
        assert_eq!(Frequency::Daily.default_days(), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(Frequency::Weekdays.default_days(), vec![1, 2, 3, 4, 5]);
        assert_eq!(Frequency::Weekends.default_days(), vec![0, 6]);
    }

    #[test]
    fn test_accumulator_starts_empty() {
        let acc = AnswersAccumulator::new();

        assert_eq!(acc.answered_count(), 0);
        for stage in StageId::all() {
            assert!(!acc.has_answer(*stage));
            assert!(acc.raw_answer(*stage).is_none());
        }
    }

    #[test]
    fn test_accumulator_has_answer_after_write() {
        let mut acc = AnswersAccumulator::new();
        acc.obvious = Some(ObviousAnswer {
            cue: "After breakfast".to_string(),
        });

        assert!(acc.has_answer(StageId::Obvious));
        assert!(!acc.has_answer(StageId::Attractive));
        assert_eq!(acc.answered_count(), 1);
    }

    #[test]
    fn test_accumulator_raw_answer_per_stage() {
        let mut acc = AnswersAccumulator::new();
        acc.satisfying = Some(SatisfyingAnswer {
            reward_tags: vec![RewardTag::CheckOff],
            custom_text: "check it off and dance".to_string(),
        });
        acc.schedule = Some(ScheduleAnswer {
            frequency: Frequency::Daily,
            time: "9:00 AM".to_string(),
            days: vec![0, 1, 2, 3, 4, 5, 6],
            raw_text: "every morning".to_string(),
        });

        assert_eq!(
            acc.raw_answer(StageId::Satisfying),
            Some("check it off and dance")
        );
        assert_eq!(acc.raw_answer(StageId::Schedule), Some("every morning"));
    }
}
