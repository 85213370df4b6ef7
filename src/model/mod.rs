// src/model/mod.rs

//! Milestone and project records.
//!
//! Field names serialize in camelCase so snapshots round-trip with the
//! interactive views that consume them.

pub mod milestone;
pub mod project;

/// Canonical milestone identifier type used throughout the engine.
pub type MilestoneId = String;

pub use milestone::{Milestone, NewMilestone};
pub use project::ProjectState;
