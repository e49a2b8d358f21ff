//! Foundation types shared across the habit domain.

mod ids;
mod stage;

pub use ids::{FamilyId, HabitId, SessionId, UserId};
pub use stage::StageId;
