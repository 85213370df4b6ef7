#![allow(dead_code)]

use std::sync::Arc;

use sitesched::dates::FixedClock;
use sitesched::engine::ScheduleEngine;
use sitesched::model::{Milestone, ProjectState};
use sitesched::types::MilestoneStatus;

use crate::{TODAY, date};

/// Builder for `ProjectState` to simplify test setup.
pub struct ProjectBuilder {
    state: ProjectState,
}

impl ProjectBuilder {
    pub fn new(start_date: &str) -> Self {
        Self {
            state: ProjectState::new(start_date, Vec::new()),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.state.name = name.to_string();
        self
    }

    pub fn auto_cascade(mut self, enabled: bool) -> Self {
        self.state.auto_cascade = enabled;
        self
    }

    pub fn with_milestone(mut self, milestone: Milestone) -> Self {
        self.state.milestones.push(milestone);
        self
    }

    pub fn build(self) -> ProjectState {
        self.state
    }

    /// Load into an engine whose clock is fixed at [`TODAY`].
    pub fn engine(self) -> ScheduleEngine {
        ScheduleEngine::with_clock(self.state, Arc::new(FixedClock::new(date(TODAY))))
            .expect("Failed to build valid engine from builder")
    }
}

/// Builder for `Milestone`.
pub struct MilestoneBuilder {
    milestone: Milestone,
}

impl MilestoneBuilder {
    pub fn new(id: &str, duration_days: i64) -> Self {
        Self {
            milestone: Milestone::new(id, id.to_uppercase(), duration_days),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.milestone.name = name.to_string();
        self
    }

    pub fn offset(mut self, days: i64) -> Self {
        self.milestone.offset_days = days;
        self
    }

    pub fn base_offset(mut self, days: i64) -> Self {
        self.milestone.base_offset_days = Some(days);
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.milestone.depends_on.push(dep.to_string());
        self
    }

    pub fn pinned(mut self, val: bool) -> Self {
        self.milestone.manually_pinned = val;
        self
    }

    pub fn status(mut self, status: MilestoneStatus) -> Self {
        self.milestone.status = status;
        self
    }

    pub fn percent(mut self, percent: u8) -> Self {
        self.milestone.percent_complete = percent;
        self
    }

    pub fn order(mut self, order: usize) -> Self {
        self.milestone.order = order;
        self
    }

    pub fn build(self) -> Milestone {
        self.milestone
    }
}

/// `m1` (28 days) followed by `m2` (14 days), starting
/// 2024-01-01.
pub fn two_step_project() -> ProjectBuilder {
    ProjectBuilder::new("2024-01-01")
        .with_milestone(MilestoneBuilder::new("m1", 28).name("M1").build())
        .with_milestone(MilestoneBuilder::new("m2", 14).name("M2").after("m1").build())
}
