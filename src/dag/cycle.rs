// src/dag/cycle.rs

use petgraph::algo::has_path_connecting;
use tracing::debug;

use crate::dag::graph::DependencyGraph;
use crate::errors::Result;
use crate::model::{Milestone, MilestoneId};

/// Would giving `target_id` the predecessor set `proposed` create a cycle?
///
/// Only the *existing* edges of the other milestones are considered; the
/// target's current `depends_on` is what is being replaced. Adding the edge
/// `p -> target` closes a cycle exactly when `p` already (transitively)
/// depends on `target`, i.e. there is a path `target -> ... -> p`.
///
/// Unknown ids in `proposed` cannot close a cycle and are ignored here.
pub fn has_circular_dependency(
    milestones: &[Milestone],
    target_id: &str,
    proposed: &[MilestoneId],
) -> bool {
    if proposed.iter().any(|p| p == target_id) {
        return true;
    }

    let graph = DependencyGraph::from_milestones(milestones);
    let Some(target) = graph.node_of(target_id) else {
        return false;
    };

    for pred in proposed {
        let Some(p) = graph.node_of(pred) else {
            continue;
        };
        if has_path_connecting(graph.inner(), target, p, None) {
            debug!(target = %target_id, predecessor = %pred, "proposed edge would close a cycle");
            return true;
        }
    }
    false
}

/// Fail with `CyclicDependency` if the sequence's edges are not a DAG.
pub fn ensure_acyclic(milestones: &[Milestone]) -> Result<()> {
    DependencyGraph::from_milestones(milestones)
        .topological_order()
        .map(|_| ())
}
