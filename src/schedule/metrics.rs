// src/schedule/metrics.rs

use serde::Serialize;

use crate::dates::{format_date, parse_date};
use crate::model::Milestone;

/// Summary numbers for dashboards and the CLI.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMetrics {
    pub completed: usize,
    pub total: usize,
    /// `completed / total` as a rounded percentage.
    pub percent_complete: u8,
    /// Latest planned finish.
    pub estimated_finish: Option<String>,
    /// Earliest planned start.
    pub first_planned_start: Option<String>,
}

pub fn schedule_metrics(milestones: &[Milestone]) -> ScheduleMetrics {
    let total = milestones.len();
    let completed = milestones.iter().filter(|m| m.is_complete()).count();
    let percent_complete = if total == 0 {
        0
    } else {
        ((completed * 100 + total / 2) / total) as u8
    };

    let estimated_finish = milestones
        .iter()
        .filter_map(|m| parse_date(&m.planned_finish))
        .max()
        .map(format_date);
    let first_planned_start = milestones
        .iter()
        .filter_map(|m| parse_date(&m.planned_start))
        .min()
        .map(format_date);

    ScheduleMetrics {
        completed,
        total,
        percent_complete,
        estimated_finish,
        first_planned_start,
    }
}
