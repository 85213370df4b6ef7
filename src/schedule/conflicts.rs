// src/schedule/conflicts.rs

use std::collections::HashMap;

use serde::Serialize;

use crate::dates::parse_date;
use crate::model::{Milestone, MilestoneId};

/// A milestone planned to start before one of its predecessors finishes.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DependencyConflict {
    pub task_id: MilestoneId,
    pub task_name: String,
    /// The most-violated predecessor (latest finish).
    pub dep_id: MilestoneId,
    pub dep_name: String,
    /// Days between the milestone's start and that predecessor's finish.
    pub overlap_days: i64,
}

/// Conflicts in an already computed sequence. Advisory only; nothing is
/// corrected here.
///
/// Milestones without a planned start, and predecessors without a planned
/// finish (or missing from the sequence), are skipped.
pub fn dependency_conflicts(milestones: &[Milestone]) -> Vec<DependencyConflict> {
    let by_id: HashMap<&str, &Milestone> = milestones.iter().map(|m| (m.id.as_str(), m)).collect();

    let mut out = Vec::new();
    for m in milestones {
        let Some(start) = parse_date(&m.planned_start) else {
            continue;
        };

        let mut worst: Option<(&Milestone, chrono::NaiveDate)> = None;
        for dep_id in &m.depends_on {
            let Some(dep) = by_id.get(dep_id.as_str()) else {
                continue;
            };
            let Some(finish) = parse_date(&dep.planned_finish) else {
                continue;
            };
            // Strictly later only, so ties keep the first listed predecessor.
            if worst.is_none_or(|(_, f)| finish > f) {
                worst = Some((dep, finish));
            }
        }

        if let Some((dep, finish)) = worst {
            if start < finish {
                out.push(DependencyConflict {
                    task_id: m.id.clone(),
                    task_name: m.name.clone(),
                    dep_id: dep.id.clone(),
                    dep_name: dep.name.clone(),
                    overlap_days: (finish - start).num_days(),
                });
            }
        }
    }
    out
}
