// src/dag/mod.rs

//! Dependency graph over milestones.
//!
//! - [`graph`] holds the id-keyed adjacency (petgraph) and the stable
//!   topological sort the forward pass runs on.
//! - [`cycle`] answers "would these predecessor edges close a cycle?" before
//!   a dependency edit is committed.

pub mod cycle;
pub mod graph;

pub use cycle::{ensure_acyclic, has_circular_dependency};
pub use graph::DependencyGraph;
