// src/engine/core.rs

//! Engine state, the commit cycle, and read-only queries.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::dag::has_circular_dependency;
use crate::dates::{Clock, SystemClock, format_date, parse_date};
use crate::engine::step::{Advisory, EngineStep};
use crate::errors::{Result, SchedError};
use crate::model::{Milestone, MilestoneId, ProjectState};
use crate::schedule::{
    DependencyConflict, PassReport, ScheduleMetrics, apply_forward_pass,
    apply_forward_pass_keeping, dependency_conflicts, schedule_metrics, shift_dependents,
};
use crate::status;

/// Owns a project's milestone sequence and serializes edits to it.
///
/// The sequence is always kept in evaluation (topological) order with
/// `order` equal to the position, and always carries freshly computed
/// planned dates.
#[derive(Debug)]
pub struct ScheduleEngine {
    project: ProjectState,
    clock: Arc<dyn Clock>,
    conflicts: Vec<DependencyConflict>,
}

impl ScheduleEngine {
    /// Load a project using the wall clock for status stamping.
    pub fn new(project: ProjectState) -> Result<Self> {
        Self::with_clock(project, Arc::new(SystemClock))
    }

    /// Load a project, repairing out-of-range fields and rejecting duplicate
    /// ids, self-dependencies and cycles.
    pub fn with_clock(project: ProjectState, clock: Arc<dyn Clock>) -> Result<Self> {
        let today = clock.today();
        let ProjectState {
            name,
            start_date,
            auto_cascade,
            mut milestones,
        } = project;

        let mut seen = HashSet::new();
        for m in milestones.iter_mut() {
            if !seen.insert(m.id.clone()) {
                return Err(SchedError::DuplicateMilestone(m.id.clone()));
            }
            dedupe_in_place(&mut m.depends_on);
            if m.depends_on.iter().any(|d| *d == m.id) {
                return Err(SchedError::CyclicDependency(format!(
                    "milestone '{}' depends on itself",
                    m.id
                )));
            }
            status::normalize(m, today);
        }

        // Stable sort by caller-supplied `order`; equal values keep their
        // positions. The forward pass then fixes anything that breaks an edge.
        milestones.sort_by_key(|m| m.order);

        let start_date = normalize_start_date(&start_date)?;
        let report = apply_forward_pass(&mut milestones, &start_date)?;
        let conflicts = dependency_conflicts(&milestones);

        info!(
            milestones = milestones.len(),
            conflicts = conflicts.len(),
            missing_start_date = report.missing_start_date,
            "schedule engine loaded"
        );

        Ok(Self {
            project: ProjectState {
                name,
                start_date,
                auto_cascade,
                milestones,
            },
            clock,
            conflicts,
        })
    }

    // === Queries ===

    pub fn project(&self) -> &ProjectState {
        &self.project
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.project.milestones
    }

    pub fn milestone(&self, id: &str) -> Option<&Milestone> {
        self.project.milestones.iter().find(|m| m.id == id)
    }

    pub fn start_date(&self) -> &str {
        &self.project.start_date
    }

    pub fn auto_cascade(&self) -> bool {
        self.project.auto_cascade
    }

    /// Owned copy of the committed project, for persistence or handing to
    /// another thread.
    pub fn snapshot(&self) -> ProjectState {
        self.project.clone()
    }

    pub fn conflicts(&self) -> &[DependencyConflict] {
        &self.conflicts
    }

    pub fn metrics(&self) -> ScheduleMetrics {
        schedule_metrics(&self.project.milestones)
    }

    // === Commit cycle ===

    /// Run `edit` against a scratch copy and commit it if every step
    /// succeeds.
    pub(crate) fn commit<F>(&mut self, action: &'static str, edit: F) -> Result<EngineStep>
    where
        F: FnOnce(&mut Draft) -> Result<()>,
    {
        let mut draft = Draft {
            milestones: self.project.milestones.clone(),
            start_date: self.project.start_date.clone(),
            auto_cascade: self.project.auto_cascade,
            today: self.clock.today(),
            shifted: Vec::new(),
            advisories: Vec::new(),
            keep_planned: HashSet::new(),
        };

        if let Err(e) = edit(&mut draft) {
            warn!(action, error = %e, "edit rejected");
            return Err(e);
        }

        let report = match apply_forward_pass_keeping(
            &mut draft.milestones,
            &draft.start_date,
            &draft.keep_planned,
        ) {
            Ok(r) => r,
            Err(e) => {
                warn!(action, error = %e, "edit rejected by forward pass");
                return Err(e);
            }
        };
        draft.absorb_report(report);

        let conflicts = dependency_conflicts(&draft.milestones);

        self.project.milestones = draft.milestones;
        self.project.start_date = draft.start_date;
        self.project.auto_cascade = draft.auto_cascade;
        self.conflicts = conflicts.clone();

        info!(
            action,
            shifted = draft.shifted.len(),
            conflicts = conflicts.len(),
            "edit committed"
        );

        Ok(EngineStep {
            shifted: draft.shifted,
            conflicts,
            advisories: draft.advisories,
        })
    }
}

/// Scratch state an edit works on before it is committed.
#[derive(Debug)]
pub(crate) struct Draft {
    pub milestones: Vec<Milestone>,
    pub start_date: String,
    pub auto_cascade: bool,
    pub today: NaiveDate,
    pub shifted: Vec<MilestoneId>,
    pub advisories: Vec<Advisory>,
    /// Milestones whose stored planned dates the commit's forward pass keeps.
    pub keep_planned: HashSet<MilestoneId>,
}

impl Draft {
    pub fn position(&self, id: &str) -> Result<usize> {
        self.milestones
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| SchedError::MilestoneNotFound(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Milestone> {
        let pos = self.position(id)?;
        Ok(&mut self.milestones[pos])
    }

    pub fn get(&self, id: &str) -> Result<&Milestone> {
        let pos = self.position(id)?;
        Ok(&self.milestones[pos])
    }

    /// Project start date, or `MissingStartDate` when none is set.
    pub fn require_start(&self) -> Result<NaiveDate> {
        parse_date(&self.start_date).ok_or(SchedError::MissingStartDate)
    }

    /// Shift dependents of `id` by `delta` when auto-cascade is on.
    pub fn cascade(&mut self, id: &str, delta: i64) -> Result<()> {
        if !self.auto_cascade {
            debug!(milestone = %id, delta, "auto-cascade disabled; not propagating");
            return Ok(());
        }
        let moved = shift_dependents(&mut self.milestones, id, delta)?;
        self.record_shifted(moved);
        Ok(())
    }

    pub fn record_shifted(&mut self, ids: impl IntoIterator<Item = MilestoneId>) {
        for id in ids {
            if !self.shifted.contains(&id) {
                self.shifted.push(id);
            }
        }
    }

    /// Clamp a requested duration to >= 1, noting the clamp.
    pub fn clamp_duration(&mut self, id: &str, requested: i64) -> i64 {
        let applied = requested.max(1);
        if applied != requested {
            self.advisories.push(Advisory::DurationClamped {
                milestone: id.to_string(),
                requested,
                applied,
            });
        }
        applied
    }

    /// Clamp a requested offset to >= 0, noting the clamp.
    pub fn clamp_offset(&mut self, id: &str, requested: i64) -> i64 {
        let applied = requested.max(0);
        if applied != requested {
            self.advisories.push(Advisory::OffsetClamped {
                milestone: id.to_string(),
                requested,
                applied,
            });
        }
        applied
    }

    /// Check that every id in `deps` exists and that giving `id` these
    /// predecessors keeps the graph acyclic.
    pub fn validate_dependencies(&self, id: &str, deps: &[MilestoneId]) -> Result<()> {
        for dep in deps {
            if dep != id && self.position(dep).is_err() {
                return Err(SchedError::UnknownDependency {
                    milestone: id.to_string(),
                    dependency: dep.clone(),
                });
            }
        }
        if has_circular_dependency(&self.milestones, id, deps) {
            return Err(SchedError::CyclicDependency(format!(
                "making '{}' depend on [{}] would create a cycle",
                id,
                deps.join(", ")
            )));
        }
        Ok(())
    }

    fn absorb_report(&mut self, report: PassReport) {
        if report.missing_start_date {
            self.advisories.push(Advisory::MissingStartDate);
        }
        for (milestone, dependency) in report.dangling {
            self.advisories.push(Advisory::DanglingDependency { milestone, dependency });
        }
    }
}

/// Remove repeated ids, keeping first occurrences in place.
pub(crate) fn dedupe_in_place(ids: &mut Vec<MilestoneId>) {
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}

/// Empty stays empty; anything else must be a valid date.
pub(crate) fn normalize_start_date(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(String::new());
    }
    parse_date(raw)
        .map(format_date)
        .ok_or_else(|| SchedError::InvalidDate(raw.to_string()))
}
