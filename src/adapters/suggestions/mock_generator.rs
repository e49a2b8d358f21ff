//! Mock Suggestion Generator for testing.
//!
//! Configurable mock implementation of the SuggestionGenerator port: scripted
//! responses consumed in order, simulated latency, error and malformed-shape
//! injection, and call tracking for verification.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::StageId;
use crate::domain::habit::{AnswersAccumulator, HabitContext, SuggestionError};
use crate::ports::SuggestionGenerator;

/// A scripted generator response.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Return this raw JSON value.
    Value(Value),
    /// Fail with this error.
    Error(SuggestionError),
}

/// Mock suggestion generator for testing.
#[derive(Debug, Clone, Default)]
pub struct MockSuggestionGenerator {
    /// Scripted responses (consumed in order; empty means fail).
    responses: Arc<Mutex<VecDeque<ScriptedResponse>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Stages requested, for verification.
    calls: Arc<Mutex<Vec<StageId>>>,
}

impl MockSuggestionGenerator {
    /// Creates a mock with no scripted responses (every call fails).
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw JSON response.
    pub fn with_value(self, value: Value) -> Self {
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .push_back(ScriptedResponse::Value(value));
        self
    }

    /// Queues a well-formed chip list built from label/value pairs.
    pub fn with_chips(self, chips: &[(&str, &str)]) -> Self {
        let value = Value::Array(
            chips
                .iter()
                .map(|(label, value)| {
                    serde_json::json!({ "label": label, "value": value })
                })
                .collect(),
        );
        self.with_value(value)
    }

    /// Queues a failure.
    pub fn with_error(self, error: SuggestionError) -> Self {
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .push_back(ScriptedResponse::Error(error));
        self
    }

    /// Sets simulated latency for every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the stages that have been requested so far.
    pub fn requested_stages(&self) -> Vec<StageId> {
        self.calls.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl SuggestionGenerator for MockSuggestionGenerator {
    async fn generate(
        &self,
        stage: StageId,
        _context: &HabitContext,
        _answers: &AnswersAccumulator,
    ) -> Result<Value, SuggestionError> {
        self.calls.lock().expect("mock lock poisoned").push(stage);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let scripted = self
            .responses
            .lock()
            .expect("mock lock poisoned")
            .pop_front();

        match scripted {
            Some(ScriptedResponse::Value(value)) => Ok(value),
            Some(ScriptedResponse::Error(error)) => Err(error),
            None => Err(SuggestionError::GenerationFailed(
                "no scripted response".to_string(),
            )),
        }
    }
}
