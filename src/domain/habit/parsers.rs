//! Per-Stage Answer Parsers
//!
//! Small, pure normalizers from free text into the stage's structured record.
//! Parsing never fails: anything unrecognized is preserved verbatim in the
//! record's raw field and covered by a deterministic default, so the user is
//! never blocked on a format they didn't know was expected.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::domain::foundation::StageId;

use super::answers::{
    AnswersAccumulator, AttractiveAnswer, EasyAnswer, Frequency, IdentityAnswer, ObviousAnswer,
    RewardTag, SatisfyingAnswer, ScheduleAnswer,
};

/// The two-minute rule: the Easy-stage duration is always 2 minutes.
pub const TWO_MINUTE_DURATION: u32 = 2;

/// Time used when the schedule answer carries no recognizable time token.
pub const DEFAULT_SCHEDULE_TIME: &str = "9:00 AM";

/// Matches `H[:MM] [AM|PM]` time tokens, meridiem optional.
static TIME_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?::([0-5]\d))?\s*([ap]m)?\b").expect("time token regex is valid")
});

/// Parses the Obvious stage: the cue is stored verbatim.
pub fn parse_obvious(raw: &str) -> ObviousAnswer {
    ObviousAnswer {
        cue: raw.to_string(),
    }
}

/// Parses the Attractive stage: the pairing text is stored verbatim.
pub fn parse_attractive(raw: &str) -> AttractiveAnswer {
    AttractiveAnswer {
        pairing: raw.to_string(),
    }
}

/// Parses the Easy stage: the starter version is stored verbatim and the
/// duration is pinned to two minutes.
pub fn parse_easy(raw: &str) -> EasyAnswer {
    EasyAnswer {
        two_minute: raw.to_string(),
        duration_minutes: TWO_MINUTE_DURATION,
    }
}

/// Parses the Satisfying stage by scanning for reward keyword families.
///
/// Tags are collected in family order; an answer matching nothing defaults
/// to `check_off`. The raw text is always retained in `custom_text`.
pub fn parse_satisfying(raw: &str) -> SatisfyingAnswer {
    let lowered = raw.to_lowercase();
    let mut reward_tags = Vec::new();

    if lowered.contains("check") || lowered.contains("tracker") {
        reward_tags.push(RewardTag::CheckOff);
    }
    if lowered.contains("visual") || lowered.contains("chart") || lowered.contains("sticker") {
        reward_tags.push(RewardTag::ProgressVisual);
    }
    if lowered.contains("celebrat") || lowered.contains("fist") || lowered.contains("dance") {
        reward_tags.push(RewardTag::Celebrate);
    }
    if lowered.contains("jar") || lowered.contains("dollar") || lowered.contains("money") {
        reward_tags.push(RewardTag::RewardJar);
    }

    if reward_tags.is_empty() {
        reward_tags.push(RewardTag::CheckOff);
    }

    debug!(tags = ?reward_tags, "parsed satisfying answer");

    SatisfyingAnswer {
        reward_tags,
        custom_text: raw.to_string(),
    }
}

/// Parses the Schedule stage: frequency by substring, time by token scan.
///
/// Unrecognized frequency defaults to daily across all 7 days; a missing
/// time token defaults to 9:00 AM. The full raw text is retained.
pub fn parse_schedule(raw: &str) -> ScheduleAnswer {
    let lowered = raw.to_lowercase();

    let frequency = if lowered.contains("daily") || lowered.contains("every day") {
        Frequency::Daily
    } else if lowered.contains("weekday") {
        Frequency::Weekdays
    } else if lowered.contains("weekend") {
        Frequency::Weekends
    } else {
        Frequency::Daily
    };

    let time = extract_time_token(raw).unwrap_or_else(|| DEFAULT_SCHEDULE_TIME.to_string());

    debug!(?frequency, %time, "parsed schedule answer");

    ScheduleAnswer {
        frequency,
        time,
        days: frequency.default_days(),
        raw_text: raw.to_string(),
    }
}

/// Parses the Identity stage: the statement is stored verbatim.
pub fn parse_identity(raw: &str) -> IdentityAnswer {
    IdentityAnswer {
        statement: raw.to_string(),
    }
}

/// Parses `raw` for `stage` and writes the result into the accumulator.
pub fn record_answer(answers: &mut AnswersAccumulator, stage: StageId, raw: &str) {
    match stage {
        StageId::Obvious => answers.obvious = Some(parse_obvious(raw)),
        StageId::Attractive => answers.attractive = Some(parse_attractive(raw)),
        StageId::Easy => answers.easy = Some(parse_easy(raw)),
        StageId::Satisfying => answers.satisfying = Some(parse_satisfying(raw)),
        StageId::Schedule => answers.schedule = Some(parse_schedule(raw)),
        StageId::Identity => answers.identity = Some(parse_identity(raw)),
    }
}

/// Finds the first plausible time token and normalizes it to `H:MM AM/PM`.
///
/// A bare hour counts ("around 7" is 7:00 AM); the meridiem is inferred as
/// AM below noon and PM otherwise when absent.
fn extract_time_token(raw: &str) -> Option<String> {
    for caps in TIME_TOKEN.captures_iter(raw) {
        let hour: u32 = match caps[1].parse() {
            Ok(h) if h <= 23 => h,
            _ => continue,
        };
        let minutes = caps.get(2).map(|m| m.as_str().to_string());
        let meridiem = caps.get(3).map(|m| m.as_str().to_uppercase());

        let (hour, meridiem) = match meridiem {
            Some(m) if (1..=12).contains(&hour) => (hour, m),
            // A 24-hour hour wins over a contradictory meridiem
            _ if hour == 0 => (12, "AM".to_string()),
            _ if hour < 12 => (hour, "AM".to_string()),
            _ if hour == 12 => (12, "PM".to_string()),
            _ => (hour - 12, "PM".to_string()),
        };

        let minutes = minutes.unwrap_or_else(|| "00".to_string());
        return Some(format!("{}:{} {}", hour, minutes, meridiem));
    }

    None
}
