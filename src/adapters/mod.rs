//! Adapters - in-process implementations of the capability ports.

pub mod persistence;
pub mod suggestions;
