//! StageId enum representing the 6 stages of the habit-setup flow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The 6 dialogue stages, in their fixed total order.
///
/// The first four follow the Four Laws of Behavior Change; the last two
/// capture scheduling and the identity statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    Obvious,
    Attractive,
    Easy,
    Satisfying,
    Schedule,
    Identity,
}

impl StageId {
    /// Returns all stages in canonical order.
    pub fn all() -> &'static [StageId] {
        &[
            StageId::Obvious,
            StageId::Attractive,
            StageId::Easy,
            StageId::Satisfying,
            StageId::Schedule,
            StageId::Identity,
        ]
    }

    /// Returns the first stage of the flow.
    pub fn first() -> StageId {
        StageId::Obvious
    }

    /// Returns the 0-based index of this stage in the canonical order.
    pub fn order_index(&self) -> usize {
        Self::all()
            .iter()
            .position(|s| s == self)
            .expect("StageId must be in all() array")
    }

    /// Returns the next stage in order, or None for the terminal stage.
    pub fn next(&self) -> Option<StageId> {
        let idx = self.order_index();
        Self::all().get(idx + 1).copied()
    }

    /// Returns the previous stage in order, if any.
    pub fn previous(&self) -> Option<StageId> {
        let idx = self.order_index();
        if idx == 0 {
            None
        } else {
            Self::all().get(idx - 1).copied()
        }
    }

    /// Returns true if this stage comes before another in order.
    pub fn is_before(&self, other: &StageId) -> bool {
        self.order_index() < other.order_index()
    }

    /// Returns true if this is the terminal stage.
    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            StageId::Obvious => "Make it Obvious",
            StageId::Attractive => "Make it Attractive",
            StageId::Easy => "Make it Easy",
            StageId::Satisfying => "Make it Satisfying",
            StageId::Schedule => "Schedule",
            StageId::Identity => "Identity",
        }
    }

    /// Returns the snake_case key used in accumulator and payload maps.
    pub fn key(&self) -> &'static str {
        match self {
            StageId::Obvious => "obvious",
            StageId::Attractive => "attractive",
            StageId::Easy => "easy",
            StageId::Satisfying => "satisfying",
            StageId::Schedule => "schedule",
            StageId::Identity => "identity",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
