//! Integration tests for the habit-formation dialogue flow.
//!
//! These tests drive the engine end to end through the host-facing surface:
//! 1. `start` validates the context and yields the Obvious prompt
//! 2. `advance` walks the six stages in fixed order
//! 3. Suggestion generation is applied or discarded via the stage tag
//! 4. Finalization persists the habit and survives persister failures
//!
//! Uses the in-process adapters so no external capability is required.

use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use habit_guide::adapters::persistence::InMemoryHabitPersister;
use habit_guide::adapters::suggestions::{MockSuggestionGenerator, StaticSuggestionGenerator};
use habit_guide::domain::foundation::{FamilyId, StageId, UserId};
use habit_guide::domain::habit::{
    parsers, EngineError, Frequency, HabitContext, HabitFormationEngine, RewardTag,
    SuggestionUpdate, TurnOutcome,
};
use habit_guide::ports::PersistError;

const SIX_ANSWERS: [&str; 6] = [
    "Put my shoes by the door",
    "Listen to a podcast while walking",
    "Walk to the corner and back",
    "I'll check it off and do a little dance",
    "every weekday around 7",
    "I am someone who moves every day",
];

fn init_tracing() {
    static TRACING: std::sync::Once = std::sync::Once::new();
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn engine_with(
    generator: MockSuggestionGenerator,
    persister: InMemoryHabitPersister,
) -> HabitFormationEngine {
    init_tracing();
    HabitFormationEngine::new(
        Arc::new(generator),
        Arc::new(persister),
        FamilyId::new(),
        UserId::new(),
    )
}

fn plain_engine() -> HabitFormationEngine {
    engine_with(MockSuggestionGenerator::new(), InMemoryHabitPersister::new())
}

// P1: stage order is fixed regardless of answer content
#[tokio::test]
async fn stages_always_arrive_in_fixed_order() {
    for answers in [
        SIX_ANSWERS,
        ["", "", "", "", "", ""],
        ["x", "y", "z", "w", "v", "u"],
    ] {
        let mut engine = plain_engine();
        let prompt = engine.start(HabitContext::new("Evening walk")).unwrap();

        let mut visited = vec![prompt.stage];
        let mut completed = false;
        for answer in answers {
            match engine.advance(answer).await.unwrap() {
                TurnOutcome::Prompt(prompt) => visited.push(prompt.stage),
                TurnOutcome::Complete(_) => completed = true,
            }
        }

        assert_eq!(visited, StageId::all());
        assert!(completed);
    }
}

// P2: raw input is recoverable verbatim from every stage's record
#[tokio::test]
async fn no_answer_text_is_ever_lost() {
    let mut engine = plain_engine();
    engine.start(HabitContext::new("Evening walk")).unwrap();

    for (index, answer) in SIX_ANSWERS.iter().enumerate() {
        let stage = StageId::all()[index];
        engine.advance(answer).await.ok();
        // The session is dropped after successful completion, so check the
        // last stage against the persisted payload instead below.
        if let Some(answers) = engine.current_answers() {
            assert_eq!(answers.raw_answer(stage), Some(*answer));
        }
    }
}

#[tokio::test]
async fn persisted_payload_retains_all_raw_text() {
    let persister = InMemoryHabitPersister::new();
    let mut engine = engine_with(MockSuggestionGenerator::new(), persister.clone());
    engine.start(HabitContext::new("Evening walk")).unwrap();

    for answer in SIX_ANSWERS {
        engine.advance(answer).await.unwrap();
    }

    let payload = &persister.stored()[0].payload;
    assert_eq!(payload.cue, SIX_ANSWERS[0]);
    assert_eq!(payload.pairing, SIX_ANSWERS[1]);
    assert_eq!(payload.two_minute, SIX_ANSWERS[2]);
    assert_eq!(payload.reward_text, SIX_ANSWERS[3]);
    assert_eq!(payload.schedule.raw_text, SIX_ANSWERS[4]);
    assert_eq!(payload.identity_statement, SIX_ANSWERS[5]);
}

// P4 + example scenario 4
#[tokio::test]
async fn schedule_stage_derives_frequency_days_and_time() {
    let persister = InMemoryHabitPersister::new();
    let mut engine = engine_with(MockSuggestionGenerator::new(), persister.clone());
    engine.start(HabitContext::new("Evening walk")).unwrap();

    for answer in SIX_ANSWERS {
        engine.advance(answer).await.unwrap();
    }

    let schedule = &persister.stored()[0].payload.schedule;
    assert_eq!(schedule.frequency, Frequency::Weekdays);
    assert_eq!(schedule.days, vec![1, 2, 3, 4, 5]);
    assert_eq!(schedule.time, "7:00 AM");
}

// P5: the suggestion list is never empty, generator or not
#[tokio::test]
async fn every_prompt_carries_suggestions_even_without_generator() {
    let mut engine = plain_engine();
    let prompt = engine.start(HabitContext::new("Evening walk")).unwrap();
    assert!(!prompt.suggestions.is_empty());

    for answer in &SIX_ANSWERS[..5] {
        if let TurnOutcome::Prompt(prompt) = engine.advance(answer).await.unwrap() {
            assert!(!prompt.suggestions.is_empty());
            assert!(prompt.suggestions.len() <= 6);
        }
    }
}

// P6: a late response for stage N never touches stage N+1
#[tokio::test]
async fn slow_generator_response_is_discarded_after_advancing() {
    let generator = MockSuggestionGenerator::new()
        .with_chips(&[("late", "a very late suggestion")])
        .with_delay(Duration::from_millis(20));
    let mut engine = engine_with(generator, InMemoryHabitPersister::new());
    engine.start(HabitContext::new("Evening walk")).unwrap();

    let tagged = engine.generate_suggestions().await.unwrap();
    assert_eq!(tagged.stage(), StageId::Obvious);

    engine.advance("Put my shoes by the door").await.unwrap();
    let update = engine.apply_suggestions(tagged);

    assert_eq!(update, SuggestionUpdate::Stale);
    let prompt = engine.current_prompt().unwrap();
    assert_eq!(prompt.stage, StageId::Attractive);
    assert!(prompt
        .suggestions
        .iter()
        .all(|chip| chip.value != "a very late suggestion"));
}

#[tokio::test]
async fn generated_suggestions_replace_fallback_while_stage_is_current() {
    let generator = MockSuggestionGenerator::new().with_value(json!([
        {"label": "After coffee", "value": "Right after my morning coffee"},
        {"label": "At the door", "value": "When I hang up my keys"}
    ]));
    let mut engine = engine_with(generator, InMemoryHabitPersister::new());
    engine.start(HabitContext::new("Evening walk")).unwrap();

    let tagged = engine.generate_suggestions().await.unwrap();
    match engine.apply_suggestions(tagged) {
        SuggestionUpdate::Applied(chips) => {
            assert_eq!(chips.len(), 2);
            assert_eq!(chips[1].value, "When I hang up my keys");
        }
        other => panic!("expected Applied, got {:?}", other),
    }
}

#[tokio::test]
async fn oversized_generator_response_falls_back_to_static_list() {
    let chip = json!({"label": "x", "value": "x"});
    let generator =
        MockSuggestionGenerator::new().with_value(serde_json::Value::Array(vec![chip; 7]));
    let mut engine = engine_with(generator, InMemoryHabitPersister::new());
    engine.start(HabitContext::new("Evening walk")).unwrap();

    let tagged = engine.generate_suggestions().await.unwrap();
    let update = engine.apply_suggestions(tagged);

    assert_eq!(update, SuggestionUpdate::RejectedMalformed);
    let prompt = engine.current_prompt().unwrap();
    assert!(!prompt.suggestions.is_empty());
    assert!(!prompt.suggestions_pending);
}

// P7 + example scenario 5
#[tokio::test]
async fn failed_finalization_is_retryable_without_redoing_stages() {
    let persister = InMemoryHabitPersister::new();
    persister.fail_next(PersistError::Unavailable("network".to_string()));
    let mut engine = engine_with(MockSuggestionGenerator::new(), persister.clone());
    engine.start(HabitContext::new("Evening walk")).unwrap();

    for answer in &SIX_ANSWERS[..5] {
        engine.advance(answer).await.unwrap();
    }
    let failure = engine.advance(SIX_ANSWERS[5]).await;
    assert!(matches!(failure, Err(EngineError::Persistence(_))));

    // All six stages intact after the failure
    let answers = engine.current_answers().unwrap();
    for stage in StageId::all() {
        assert!(answers.has_answer(*stage));
    }

    let payload_before = engine.pending_payload().unwrap();
    let completion = engine.finalize().await.unwrap();

    assert!(completion.confirmation_text.contains("Evening walk"));
    assert_eq!(persister.stored()[0].payload, payload_before);
}

// Example scenario 6
#[test]
fn empty_title_is_rejected_before_any_session_exists() {
    let mut engine = plain_engine();

    let result = engine.start(HabitContext::new(""));

    assert!(matches!(result, Err(EngineError::InvalidStartContext(_))));
    assert!(engine.session().is_none());
    assert!(engine.current_answers().is_none());
}

#[tokio::test]
async fn static_generator_serves_usable_chips_for_the_whole_flow() {
    let mut engine = HabitFormationEngine::new(
        Arc::new(StaticSuggestionGenerator::new()),
        Arc::new(InMemoryHabitPersister::new()),
        FamilyId::new(),
        UserId::new(),
    );
    engine.start(HabitContext::new("Evening walk")).unwrap();

    for _ in 0..3 {
        let tagged = engine.generate_suggestions().await.unwrap();
        match engine.apply_suggestions(tagged) {
            SuggestionUpdate::Applied(chips) => assert!(!chips.is_empty()),
            other => panic!("static generator should apply cleanly, got {:?}", other),
        }
        engine.advance("an answer").await.unwrap();
    }
}

// P2/P3 as properties over arbitrary answer text
proptest! {
    #[test]
    fn satisfying_parser_never_loses_text_and_never_returns_empty_tags(raw in ".*") {
        let answer = parsers::parse_satisfying(&raw);

        prop_assert_eq!(&answer.custom_text, &raw);
        prop_assert!(!answer.reward_tags.is_empty());

        // Idempotence: same input, same tags
        let again = parsers::parse_satisfying(&raw);
        prop_assert_eq!(answer.reward_tags, again.reward_tags);
    }

    #[test]
    fn schedule_parser_always_yields_valid_days_and_raw_text(raw in ".*") {
        let answer = parsers::parse_schedule(&raw);

        prop_assert_eq!(&answer.raw_text, &raw);
        prop_assert!(!answer.days.is_empty());
        prop_assert!(answer.days.iter().all(|d| *d <= 6));
        prop_assert!(!answer.time.is_empty());
    }
}
