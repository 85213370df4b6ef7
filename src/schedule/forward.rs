// src/schedule/forward.rs

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::dag::DependencyGraph;
use crate::dates::{self, format_date, parse_date};
use crate::errors::Result;
use crate::model::{Milestone, MilestoneId};

/// What a forward pass noticed while computing dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// No usable project start date; planned dates were cleared.
    pub missing_start_date: bool,
    /// `(milestone, missing predecessor)` references that were ignored.
    pub dangling: Vec<(MilestoneId, MilestoneId)>,
}

/// Pure variant of [`apply_forward_pass`]: returns the computed sequence in
/// evaluation order and leaves the input untouched.
pub fn compute_schedule(milestones: &[Milestone], start_date: &str) -> Result<Vec<Milestone>> {
    let mut out = milestones.to_vec();
    apply_forward_pass(&mut out, start_date)?;
    Ok(out)
}

/// Sort `milestones` topologically, renumber `order`, and fill
/// `planned_start` / `planned_finish` (plus the legacy mirrors).
///
/// Start rule per milestone, in evaluation order:
/// - pinned: `start_date + offset_days`;
/// - otherwise the latest finish among its present predecessors;
/// - otherwise `start_date + offset_days`.
///
/// Finish is always `start + duration_days`. Fails with `CyclicDependency`
/// (leaving `milestones` untouched) if the edges are not a DAG.
pub fn apply_forward_pass(milestones: &mut Vec<Milestone>, start_date: &str) -> Result<PassReport> {
    apply_forward_pass_keeping(milestones, start_date, &HashSet::new())
}

/// [`apply_forward_pass`], except milestones in `keep` retain their stored
/// planned dates when both parse. Their finish still feeds their
/// dependents.
pub fn apply_forward_pass_keeping(
    milestones: &mut Vec<Milestone>,
    start_date: &str,
    keep: &HashSet<MilestoneId>,
) -> Result<PassReport> {
    let graph = DependencyGraph::from_milestones(milestones);
    let topo = graph.topological_order()?;

    let mut slots: Vec<Option<Milestone>> = std::mem::take(milestones).into_iter().map(Some).collect();
    *milestones = topo.iter().filter_map(|&pos| slots[pos].take()).collect();

    let mut report = PassReport {
        missing_start_date: false,
        dangling: graph.dangling().to_vec(),
    };

    let start = parse_date(start_date);
    if start.is_none() {
        report.missing_start_date = true;
        debug!(start_date = %start_date, "no project start date; clearing planned dates");
    }

    let mut finishes: HashMap<MilestoneId, NaiveDate> = HashMap::with_capacity(milestones.len());

    for (idx, m) in milestones.iter_mut().enumerate() {
        m.order = idx;
        m.duration_days = m.duration_days.max(1);
        m.offset_days = m.offset_days.max(0);

        let Some(start) = start else {
            m.planned_start.clear();
            m.planned_finish.clear();
            m.sync_legacy_fields(start_date);
            continue;
        };

        if keep.contains(&m.id) {
            if let (Some(kept_start), Some(kept_finish)) =
                (parse_date(&m.planned_start), parse_date(&m.planned_finish))
            {
                debug!(milestone = %m.id, start = %kept_start, "keeping planned dates");
                finishes.insert(m.id.clone(), kept_finish);
                m.sync_legacy_fields(start_date);
                continue;
            }
        }

        let anchor = dates::shift(start, m.offset_days);
        let from_preds = if m.manually_pinned {
            None
        } else {
            m.depends_on.iter().filter_map(|d| finishes.get(d)).max().copied()
        };

        let planned_start = from_preds.or(anchor);
        let planned_finish = planned_start.and_then(|s| dates::shift(s, m.duration_days));

        m.planned_start = planned_start.map(format_date).unwrap_or_default();
        m.planned_finish = planned_finish.map(format_date).unwrap_or_default();
        if let Some(finish) = planned_finish {
            finishes.insert(m.id.clone(), finish);
        }
        m.sync_legacy_fields(start_date);
    }

    Ok(report)
}
