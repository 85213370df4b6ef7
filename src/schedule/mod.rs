// src/schedule/mod.rs

//! Date computation over a milestone sequence.
//!
//! - [`forward`] runs the topological forward pass that fills planned dates.
//! - [`conflicts`] reports milestones that start before a predecessor ends.
//! - [`cascade`] shifts transitive dependents after an edit.
//! - [`regenerate`] resets offsets from their template values.
//! - [`metrics`] summarizes a computed sequence.

pub mod cascade;
pub mod conflicts;
pub mod forward;
pub mod metrics;
pub mod regenerate;

pub use cascade::{cascade_dependents, shift_dependents};
pub use conflicts::{DependencyConflict, dependency_conflicts};
pub use forward::{PassReport, apply_forward_pass, apply_forward_pass_keeping, compute_schedule};
pub use metrics::{ScheduleMetrics, schedule_metrics};
pub use regenerate::{RegenerateOptions, completed_ids, regenerate_schedule};
