// src/dag/graph.rs

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use tracing::warn;

use crate::errors::{Result, SchedError};
use crate::model::{Milestone, MilestoneId};

/// Adjacency over milestone ids, built from a milestone slice.
///
/// Node `i` is the milestone at position `i` of the slice the graph was built
/// from. Edges point from predecessor to dependent: for
/// `framing.depends_on = ["foundation"]` there is an edge
/// `foundation -> framing`.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<usize, ()>,
    ids: Vec<MilestoneId>,
    index: HashMap<MilestoneId, NodeIndex>,
    /// Sort key per node: (declared `order`, position).
    keys: Vec<(usize, usize)>,
    /// `(milestone, missing predecessor)` pairs that were skipped.
    dangling: Vec<(MilestoneId, MilestoneId)>,
}

impl DependencyGraph {
    pub fn from_milestones(milestones: &[Milestone]) -> Self {
        let mut graph = DiGraph::with_capacity(milestones.len(), milestones.len());
        let mut index = HashMap::with_capacity(milestones.len());
        let mut ids = Vec::with_capacity(milestones.len());
        let mut keys = Vec::with_capacity(milestones.len());

        for (pos, m) in milestones.iter().enumerate() {
            let node = graph.add_node(pos);
            // First occurrence wins; duplicates are rejected by the engine.
            index.entry(m.id.clone()).or_insert(node);
            ids.push(m.id.clone());
            keys.push((m.order, pos));
        }

        let mut dangling = Vec::new();
        for (pos, m) in milestones.iter().enumerate() {
            let to = NodeIndex::new(pos);
            for dep in &m.depends_on {
                match index.get(dep) {
                    Some(&from) => {
                        if graph.find_edge(from, to).is_none() {
                            graph.add_edge(from, to, ());
                        }
                    }
                    None => {
                        warn!(milestone = %m.id, dependency = %dep, "dangling dependency reference; ignoring");
                        dangling.push((m.id.clone(), dep.clone()));
                    }
                }
            }
        }

        Self {
            graph,
            ids,
            index,
            keys,
            dangling,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub(crate) fn node_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub(crate) fn inner(&self) -> &DiGraph<usize, ()> {
        &self.graph
    }

    /// Positions of the present direct predecessors of `id`.
    pub fn predecessors_of(&self, id: &str) -> Vec<usize> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Positions of the direct dependents of `id`.
    pub fn dependents_of(&self, id: &str) -> Vec<usize> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Positions of every milestone reachable from `id` through dependency
    /// edges (direct or indirect), excluding `id` itself.
    pub fn transitive_dependents(&self, id: &str) -> Vec<usize> {
        let Some(start) = self.node_of(id) else {
            return Vec::new();
        };

        let mut bfs = Bfs::new(&self.graph, start);
        let mut out = Vec::new();
        while let Some(node) = bfs.next(&self.graph) {
            if node != start {
                out.push(node.index());
            }
        }
        out.sort_unstable();
        out
    }

    pub fn dangling(&self) -> &[(MilestoneId, MilestoneId)] {
        &self.dangling
    }

    /// Stable topological order (Kahn's algorithm).
    ///
    /// Among milestones whose predecessors are all placed, the one with the
    /// lowest declared `order` (then lowest position) goes first, so an order
    /// that already respects the edges comes back unchanged.
    pub fn topological_order(&self) -> Result<Vec<usize>> {
        let n = self.graph.node_count();
        let mut in_degree: Vec<usize> = (0..n)
            .map(|i| {
                self.graph
                    .neighbors_directed(NodeIndex::new(i), Direction::Incoming)
                    .count()
            })
            .collect();

        let mut ready: BinaryHeap<Reverse<((usize, usize), usize)>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == 0)
            .map(|(i, _)| Reverse((self.keys[i], i)))
            .collect();

        let mut order = Vec::with_capacity(n);
        while let Some(Reverse((_, pos))) = ready.pop() {
            order.push(pos);
            for next in self
                .graph
                .neighbors_directed(NodeIndex::new(pos), Direction::Outgoing)
            {
                let i = next.index();
                in_degree[i] -= 1;
                if in_degree[i] == 0 {
                    ready.push(Reverse((self.keys[i], i)));
                }
            }
        }

        if order.len() < n {
            let stuck = in_degree
                .iter()
                .position(|d| *d > 0)
                .map(|i| self.ids[i].clone())
                .unwrap_or_default();
            return Err(SchedError::CyclicDependency(format!(
                "cycle detected in milestone graph involving '{stuck}'"
            )));
        }

        Ok(order)
    }

    fn neighbors(&self, id: &str, dir: Direction) -> Vec<usize> {
        let Some(node) = self.node_of(id) else {
            return Vec::new();
        };
        let mut out: Vec<usize> = self
            .graph
            .neighbors_directed(node, dir)
            .map(|n| n.index())
            .collect();
        out.sort_unstable();
        out
    }
}
