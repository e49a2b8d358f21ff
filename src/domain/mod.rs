//! Domain layer - pure dialogue logic with no I/O.

pub mod foundation;
pub mod habit;
