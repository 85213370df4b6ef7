// src/status.rs

//! Status / percent-complete coupling and the pin flag.
//!
//! Transitions are direct (any status can be set from any other):
//!
//! | entering      | percent            | actual start     | actual finish |
//! |---------------|--------------------|------------------|---------------|
//! | `not_started` | 0                  | cleared          | cleared       |
//! | `in_progress` | 0 → 1, 100 → 99    | stamped if unset | cleared       |
//! | `complete`    | 100                | stamped if unset | stamped       |

use chrono::NaiveDate;
use tracing::debug;

use crate::dates::{format_date, parse_date};
use crate::model::Milestone;
use crate::types::MilestoneStatus;

/// Percent used when work starts with no progress recorded.
pub const NOMINAL_IN_PROGRESS_PERCENT: u8 = 1;

/// Move `m` to `status`, keeping percent and actual dates consistent.
/// Setting the current status again is a no-op.
pub fn apply_status(m: &mut Milestone, status: MilestoneStatus, today: NaiveDate) {
    if m.status == status {
        return;
    }
    debug!(milestone = %m.id, from = %m.status, to = %status, "status transition");

    match status {
        MilestoneStatus::NotStarted => {
            m.percent_complete = 0;
            m.actual_start.clear();
            m.actual_finish.clear();
        }
        MilestoneStatus::InProgress => {
            if m.percent_complete == 0 {
                m.percent_complete = NOMINAL_IN_PROGRESS_PERCENT;
            } else if m.percent_complete >= 100 {
                m.percent_complete = 99;
            }
            if m.actual_start.is_empty() {
                m.actual_start = format_date(today);
            }
            m.actual_finish.clear();
        }
        MilestoneStatus::Complete => {
            m.percent_complete = 100;
            if m.actual_start.is_empty() {
                m.actual_start = format_date(today);
            }
            m.actual_finish = format_date(today);
        }
    }
    m.status = status;
}

/// Set percent complete (clamped to 0..=100) and derive the status from it.
pub fn apply_percent_complete(m: &mut Milestone, percent: i64, today: NaiveDate) {
    let percent = percent.clamp(0, 100) as u8;
    match percent {
        0 => apply_status(m, MilestoneStatus::NotStarted, today),
        100 => apply_status(m, MilestoneStatus::Complete, today),
        p => {
            if m.status != MilestoneStatus::InProgress {
                apply_status(m, MilestoneStatus::InProgress, today);
            }
            m.percent_complete = p;
        }
    }
}

/// Flip the pin flag; returns the new value. See [`set_pin`].
pub fn toggle_pin(m: &mut Milestone, start_date: &str) -> bool {
    set_pin(m, !m.manually_pinned, start_date);
    m.manually_pinned
}

/// Set the pin flag.
///
/// Pinning freezes the milestone where it currently sits: its offset is
/// rewritten so that `start_date + offset_days` equals the planned start.
/// Without a computed planned start (or project start) the offset is kept.
pub fn set_pin(m: &mut Milestone, pinned: bool, start_date: &str) {
    if pinned && !m.manually_pinned {
        if let (Some(project_start), Some(planned)) =
            (parse_date(start_date), parse_date(&m.planned_start))
        {
            let offset = (planned - project_start).num_days().max(0);
            debug!(milestone = %m.id, before = m.offset_days, after = offset, "pinned at planned start");
            m.offset_days = offset;
        }
    }
    m.manually_pinned = pinned;
}

/// Repair status invariants on a record that came from outside the engine
/// (a project file or snapshot).
pub fn normalize(m: &mut Milestone, today: NaiveDate) {
    m.percent_complete = m.percent_complete.min(100);
    match m.status {
        MilestoneStatus::NotStarted => {
            m.percent_complete = 0;
            m.actual_start.clear();
            m.actual_finish.clear();
        }
        MilestoneStatus::InProgress => {
            if m.percent_complete == 0 {
                m.percent_complete = NOMINAL_IN_PROGRESS_PERCENT;
            } else if m.percent_complete == 100 {
                m.percent_complete = 99;
            }
            m.actual_finish.clear();
        }
        MilestoneStatus::Complete => {
            m.percent_complete = 100;
            if m.actual_finish.is_empty() {
                m.actual_finish = format_date(today);
            }
            if m.actual_start.is_empty() {
                m.actual_start = m.actual_finish.clone();
            }
        }
    }
}
