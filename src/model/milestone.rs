// src/model/milestone.rs

use serde::{Deserialize, Serialize};

use crate::dates;
use crate::model::MilestoneId;
use crate::types::MilestoneStatus;

/// A schedulable unit of construction work.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    // === Identity ===
    pub id: MilestoneId,
    pub name: String,

    /// Evaluation position. Re-derived by the engine after structural edits.
    #[serde(default)]
    pub order: usize,

    // === Scheduling (input) ===
    /// Days from project start; the start anchor when no predecessor finish
    /// is available, and always for pinned milestones.
    #[serde(default)]
    pub offset_days: i64,

    /// Template offset that regeneration resets to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_offset_days: Option<i64>,

    #[serde(default = "default_duration")]
    pub duration_days: i64,

    /// Predecessors (finish-to-start).
    #[serde(default)]
    pub depends_on: Vec<MilestoneId>,

    #[serde(default)]
    pub manually_pinned: bool,

    // === Status ===
    #[serde(default)]
    pub status: MilestoneStatus,

    #[serde(default)]
    pub percent_complete: u8,

    // === Calculated ===
    #[serde(default)]
    pub planned_start: String,
    #[serde(default)]
    pub planned_finish: String,

    // === Actuals ===
    #[serde(default)]
    pub actual_start: String,
    #[serde(default)]
    pub actual_finish: String,

    // === Trade (opaque) ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text_trade: Option<String>,

    // === Legacy mirrors (derived) ===
    #[serde(default)]
    pub wk: i64,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub planned: String,
}

fn default_duration() -> i64 {
    1
}

impl Milestone {
    /// Create a not-started milestone with no predecessors.
    pub fn new(id: impl Into<MilestoneId>, name: impl Into<String>, duration_days: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order: 0,
            offset_days: 0,
            base_offset_days: None,
            duration_days: duration_days.max(1),
            depends_on: Vec::new(),
            manually_pinned: false,
            status: MilestoneStatus::NotStarted,
            percent_complete: 0,
            planned_start: String::new(),
            planned_finish: String::new(),
            actual_start: String::new(),
            actual_finish: String::new(),
            trade_id: None,
            free_text_trade: None,
            wk: 1,
            done: false,
            date: String::new(),
            planned: String::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == MilestoneStatus::Complete
    }

    /// Offset that regeneration treats as this milestone's template value.
    pub fn effective_base_offset(&self) -> i64 {
        self.base_offset_days.unwrap_or(self.offset_days).max(0)
    }

    /// Refresh `wk`/`done`/`date`/`planned` from the authoritative fields.
    pub fn sync_legacy_fields(&mut self, start_date: &str) {
        let days_in = if self.planned_start.is_empty() {
            self.offset_days
        } else {
            dates::days_between(start_date, &self.planned_start)
        };
        self.wk = days_in.max(0) / 7 + 1;
        self.done = self.is_complete();
        self.date = if self.is_complete() && !self.actual_finish.is_empty() {
            self.actual_finish.clone()
        } else {
            self.planned_finish.clone()
        };
        self.planned = self.planned_finish.clone();
    }
}

/// Input for [`crate::engine::ScheduleEngine::add_milestone`].
#[derive(Debug, Clone, Default)]
pub struct NewMilestone {
    pub name: String,
    pub duration_days: i64,
    /// Defaults to just past the latest `offset + duration` in the sequence.
    pub offset_days: Option<i64>,
    pub depends_on: Vec<MilestoneId>,
    pub trade_id: Option<String>,
    pub free_text_trade: Option<String>,
}

impl NewMilestone {
    pub fn new(name: impl Into<String>, duration_days: i64) -> Self {
        Self {
            name: name.into(),
            duration_days,
            ..Default::default()
        }
    }

    pub fn after(mut self, dep: impl Into<MilestoneId>) -> Self {
        self.depends_on.push(dep.into());
        self
    }

    pub fn at_offset(mut self, offset_days: i64) -> Self {
        self.offset_days = Some(offset_days);
        self
    }
}
