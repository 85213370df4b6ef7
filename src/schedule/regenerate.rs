// src/schedule/regenerate.rs

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::dag::DependencyGraph;
use crate::errors::Result;
use crate::model::{Milestone, MilestoneId};
use crate::schedule::forward::{PassReport, apply_forward_pass_keeping};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegenerateOptions {
    /// Also reset (and unpin) pinned milestones.
    pub pinned_override: bool,
}

/// Whole-schedule reset of offsets, followed by a forward pass.
///
/// In topological order, each eligible milestone gets
/// `max(base, latest predecessor offset + duration)`, where `base` is its
/// template offset. Complete milestones are never touched: they keep their
/// offsets and their actual and planned dates. Pinned ones are reset only
/// with `pinned_override`. Running it twice gives the same result.
pub fn regenerate_schedule(
    milestones: &mut Vec<Milestone>,
    start_date: &str,
    options: RegenerateOptions,
) -> Result<PassReport> {
    let graph = DependencyGraph::from_milestones(milestones);
    let topo = graph.topological_order()?;
    let keep = completed_ids(milestones);

    // Offset-space finish of each milestone already visited.
    let mut ends: HashMap<MilestoneId, i64> = HashMap::with_capacity(milestones.len());

    for pos in topo {
        let m = &mut milestones[pos];
        let eligible = !m.is_complete() && (!m.manually_pinned || options.pinned_override);

        if eligible {
            let base = m.effective_base_offset();
            let floor = m.depends_on.iter().filter_map(|d| ends.get(d)).max().copied();
            let offset = floor.map_or(base, |f| f.max(base));

            debug!(milestone = %m.id, before = m.offset_days, after = offset, "regenerated offset");
            m.base_offset_days = Some(base);
            m.offset_days = offset;
            m.manually_pinned = false;
        }

        ends.insert(m.id.clone(), m.offset_days.max(0) + m.duration_days.max(1));
    }

    apply_forward_pass_keeping(milestones, start_date, &keep)
}

/// Milestones whose planned dates regeneration leaves alone.
pub fn completed_ids(milestones: &[Milestone]) -> HashSet<MilestoneId> {
    milestones
        .iter()
        .filter(|m| m.is_complete())
        .map(|m| m.id.clone())
        .collect()
}
