//! Habit Guide - Guided Habit-Formation Dialogue Engine
//!
//! This crate implements the Four Laws framework (Make it Obvious, Attractive,
//! Easy, Satisfying — plus Schedule and Identity steps) for setting up a habit
//! through a short, bounded conversational flow.

pub mod adapters;
pub mod domain;
pub mod ports;
