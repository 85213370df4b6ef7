// src/schedule/cascade.rs

use tracing::debug;

use crate::dag::DependencyGraph;
use crate::errors::{Result, SchedError};
use crate::model::{Milestone, MilestoneId};
use crate::schedule::forward::{PassReport, apply_forward_pass};

/// Shift `offset_days` of every transitive dependent of `changed_id` by
/// `delta_days` and return the ids that moved.
///
/// Pinned milestones keep their offset, but they stay in the graph: their
/// own dependents are still reached and shifted. Offsets clamp at zero.
pub fn shift_dependents(
    milestones: &mut [Milestone],
    changed_id: &str,
    delta_days: i64,
) -> Result<Vec<MilestoneId>> {
    let graph = DependencyGraph::from_milestones(milestones);
    if !graph.contains(changed_id) {
        return Err(SchedError::MilestoneNotFound(changed_id.to_string()));
    }
    if delta_days == 0 {
        return Ok(Vec::new());
    }

    let mut shifted = Vec::new();
    for pos in graph.transitive_dependents(changed_id) {
        let m = &mut milestones[pos];
        if m.manually_pinned {
            debug!(milestone = %m.id, delta_days, "pinned; not shifting");
            continue;
        }
        let before = m.offset_days;
        m.offset_days = (before + delta_days).max(0);
        debug!(milestone = %m.id, before, after = m.offset_days, "cascaded offset");
        shifted.push(m.id.clone());
    }
    Ok(shifted)
}

/// [`shift_dependents`] followed by a full forward pass.
pub fn cascade_dependents(
    milestones: &mut Vec<Milestone>,
    changed_id: &str,
    delta_days: i64,
    start_date: &str,
) -> Result<(Vec<MilestoneId>, PassReport)> {
    let shifted = shift_dependents(milestones, changed_id, delta_days)?;
    let report = apply_forward_pass(milestones, start_date)?;
    Ok((shifted, report))
}
