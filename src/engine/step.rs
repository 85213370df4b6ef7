// src/engine/step.rs

//! Result types for engine mutations.

use serde::Serialize;

use crate::model::MilestoneId;
use crate::schedule::DependencyConflict;

/// Non-fatal notes produced while committing an edit.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// No project start date; offsets and durations are kept but planned
    /// dates are empty.
    MissingStartDate,
    /// A duration below 1 was raised to 1.
    DurationClamped {
        milestone: MilestoneId,
        requested: i64,
        applied: i64,
    },
    /// A negative offset was raised to 0.
    OffsetClamped {
        milestone: MilestoneId,
        requested: i64,
        applied: i64,
    },
    /// A predecessor id that is not in the sequence; it was ignored.
    DanglingDependency {
        milestone: MilestoneId,
        dependency: MilestoneId,
    },
}

/// Structured result of a single committed mutation.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineStep {
    /// Milestones whose offset was moved by a cascade or bulk shift.
    pub shifted: Vec<MilestoneId>,
    /// Conflicts in the committed sequence.
    pub conflicts: Vec<DependencyConflict>,
    pub advisories: Vec<Advisory>,
}

impl EngineStep {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn has_advisory(&self, pred: impl Fn(&Advisory) -> bool) -> bool {
        self.advisories.iter().any(pred)
    }
}
