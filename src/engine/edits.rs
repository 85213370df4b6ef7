// src/engine/edits.rs

//! Mutation operations exposed to timeline and list views.

use tracing::debug;
use uuid::Uuid;

use crate::dates::{self, format_date, parse_date};
use crate::engine::core::{Draft, ScheduleEngine, dedupe_in_place, normalize_start_date};
use crate::engine::step::EngineStep;
use crate::errors::{Result, SchedError};
use crate::model::{Milestone, MilestoneId, NewMilestone};
use crate::schedule::{RegenerateOptions, completed_ids, regenerate_schedule};
use crate::status;
use crate::types::MilestoneStatus;

impl ScheduleEngine {
    pub fn set_status(&mut self, id: &str, new_status: MilestoneStatus) -> Result<EngineStep> {
        self.commit("set_status", |d| {
            let today = d.today;
            status::apply_status(d.get_mut(id)?, new_status, today);
            Ok(())
        })
    }

    /// Percent is clamped to 0..=100 and drives the status.
    pub fn set_percent_complete(&mut self, id: &str, percent: i64) -> Result<EngineStep> {
        self.commit("set_percent_complete", |d| {
            let today = d.today;
            status::apply_percent_complete(d.get_mut(id)?, percent, today);
            Ok(())
        })
    }

    /// Durations below 1 are clamped. Dependents move by the change when
    /// auto-cascade is on.
    pub fn set_duration(&mut self, id: &str, days: i64) -> Result<EngineStep> {
        self.commit("set_duration", |d| apply_duration(d, id, days))
    }

    /// Negative offsets are clamped to 0. Dependents move by the change when
    /// auto-cascade is on.
    pub fn set_offset(&mut self, id: &str, days: i64) -> Result<EngineStep> {
        self.commit("set_offset", |d| {
            d.position(id)?;
            let applied = d.clamp_offset(id, days);
            let m = d.get_mut(id)?;
            let delta = applied - m.offset_days;
            m.offset_days = applied;
            d.cascade(id, delta)
        })
    }

    /// Drag a milestone's start to `date`: pins it, stores the offset from
    /// the project start, and cascades by how far its start actually moved.
    pub fn set_start_date_manual(&mut self, id: &str, date: &str) -> Result<EngineStep> {
        let target = parse_date(date).ok_or_else(|| SchedError::InvalidDate(date.to_string()))?;

        self.commit("set_start_date_manual", |d| {
            let project_start = d.require_start()?;
            let requested = (target - project_start).num_days();
            let offset = d.clamp_offset(id, requested);

            let m = d.get_mut(id)?;
            let old_start = parse_date(&m.planned_start)
                .or_else(|| dates::shift(project_start, m.offset_days))
                .unwrap_or(project_start);
            let new_start = dates::shift(project_start, offset).unwrap_or(project_start);

            m.offset_days = offset;
            m.manually_pinned = true;
            let delta = (new_start - old_start).num_days();
            debug!(milestone = %id, start = %format_date(new_start), delta, "start pinned");

            d.cascade(id, delta)
        })
    }

    /// Drag a milestone's finish to `date`: the duration is solved from its
    /// planned start, then applied as [`Self::set_duration`].
    pub fn set_finish_date_manual(&mut self, id: &str, date: &str) -> Result<EngineStep> {
        let target = parse_date(date).ok_or_else(|| SchedError::InvalidDate(date.to_string()))?;

        self.commit("set_finish_date_manual", |d| {
            let start = parse_date(&d.get(id)?.planned_start).ok_or(SchedError::MissingStartDate)?;
            apply_duration(d, id, (target - start).num_days())
        })
    }

    /// Replace the predecessor set. Rejected with `CyclicDependency` or
    /// `UnknownDependency` without changing anything.
    pub fn set_dependencies(&mut self, id: &str, depends_on: Vec<MilestoneId>) -> Result<EngineStep> {
        let mut deps = depends_on;
        dedupe_in_place(&mut deps);

        self.commit("set_dependencies", |d| {
            d.position(id)?;
            d.validate_dependencies(id, &deps)?;
            d.get_mut(id)?.depends_on = deps;
            Ok(())
        })
    }

    /// Pinning keeps the milestone's current planned dates; see
    /// [`status::set_pin`].
    pub fn toggle_pin(&mut self, id: &str) -> Result<EngineStep> {
        self.commit("toggle_pin", |d| {
            let start_date = d.start_date.clone();
            status::toggle_pin(d.get_mut(id)?, &start_date);
            Ok(())
        })
    }

    pub fn set_pinned(&mut self, id: &str, pinned: bool) -> Result<EngineStep> {
        self.commit("set_pinned", |d| {
            let start_date = d.start_date.clone();
            status::set_pin(d.get_mut(id)?, pinned, &start_date);
            Ok(())
        })
    }

    /// Move every incomplete, unpinned milestone by `days` (offsets clamp
    /// at 0).
    pub fn bulk_shift(&mut self, days: i64) -> Result<EngineStep> {
        self.commit("bulk_shift", |d| {
            if days == 0 {
                return Ok(());
            }
            let mut moved = Vec::new();
            for m in d.milestones.iter_mut() {
                if m.is_complete() || m.manually_pinned {
                    continue;
                }
                m.offset_days = (m.offset_days + days).max(0);
                moved.push(m.id.clone());
            }
            d.record_shifted(moved);
            Ok(())
        })
    }

    /// Move a milestone to `new_index` in the sequence. Rejected when that
    /// would put it before one of its predecessors or after one of its
    /// dependents.
    pub fn reorder(&mut self, id: &str, new_index: usize) -> Result<EngineStep> {
        self.commit("reorder", |d| {
            let from = d.position(id)?;
            let to = new_index.min(d.milestones.len().saturating_sub(1));
            if from == to {
                return Ok(());
            }

            let moved = d.milestones.remove(from);
            d.milestones.insert(to, moved);

            let moved = &d.milestones[to];
            for (pos, other) in d.milestones.iter().enumerate() {
                let before_pred = pos > to && moved.depends_on.contains(&other.id);
                let after_dependent = pos < to && other.depends_on.contains(&moved.id);
                if before_pred || after_dependent {
                    return Err(SchedError::ReorderViolatesDependency {
                        milestone: id.to_string(),
                        other: other.id.clone(),
                    });
                }
            }

            for (pos, m) in d.milestones.iter_mut().enumerate() {
                m.order = pos;
            }
            Ok(())
        })
    }

    /// Append a milestone and return its id.
    ///
    /// The offset defaults to the latest `offset + duration` currently in the
    /// sequence; the template offset is recorded as that value.
    pub fn add_milestone(&mut self, spec: NewMilestone) -> Result<(MilestoneId, EngineStep)> {
        self.add_milestone_with_id(Uuid::new_v4().to_string(), spec)
    }

    /// [`Self::add_milestone`] with a caller-chosen id.
    pub fn add_milestone_with_id(
        &mut self,
        id: impl Into<MilestoneId>,
        spec: NewMilestone,
    ) -> Result<(MilestoneId, EngineStep)> {
        let id = id.into();
        let step = self.commit("add_milestone", |d| {
            if d.position(&id).is_ok() {
                return Err(SchedError::DuplicateMilestone(id.clone()));
            }

            let mut deps = spec.depends_on;
            dedupe_in_place(&mut deps);
            d.validate_dependencies(&id, &deps)?;

            let default_offset = d
                .milestones
                .iter()
                .map(|m| m.offset_days + m.duration_days)
                .max()
                .unwrap_or(0);
            let offset = match spec.offset_days {
                Some(o) => d.clamp_offset(&id, o),
                None => default_offset,
            };
            let duration = d.clamp_duration(&id, spec.duration_days);

            let mut m = Milestone::new(id.clone(), spec.name, duration);
            m.order = d.milestones.len();
            m.offset_days = offset;
            m.base_offset_days = Some(offset);
            m.depends_on = deps;
            m.trade_id = spec.trade_id;
            m.free_text_trade = spec.free_text_trade;
            d.milestones.push(m);
            Ok(())
        })?;
        Ok((id, step))
    }

    /// Delete a milestone and strip it from every `depends_on`.
    pub fn remove_milestone(&mut self, id: &str) -> Result<EngineStep> {
        self.commit("remove_milestone", |d| {
            let pos = d.position(id)?;
            d.milestones.remove(pos);
            for m in d.milestones.iter_mut() {
                m.depends_on.retain(|dep| dep != id);
            }
            Ok(())
        })
    }

    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> Result<EngineStep> {
        let name = name.into();
        self.commit("rename", |d| {
            d.get_mut(id)?.name = name;
            Ok(())
        })
    }

    /// Attach a trade reference and/or an unresolved free-text label.
    pub fn set_trade(
        &mut self,
        id: &str,
        trade_id: Option<String>,
        free_text_trade: Option<String>,
    ) -> Result<EngineStep> {
        self.commit("set_trade", |d| {
            let m = d.get_mut(id)?;
            m.trade_id = trade_id;
            m.free_text_trade = free_text_trade;
            Ok(())
        })
    }

    /// Change the project start date. An empty string clears it.
    pub fn set_start_date(&mut self, date: &str) -> Result<EngineStep> {
        let date = normalize_start_date(date)?;
        self.commit("set_start_date", |d| {
            d.start_date = date;
            Ok(())
        })
    }

    pub fn set_auto_cascade(&mut self, enabled: bool) -> Result<EngineStep> {
        self.commit("set_auto_cascade", |d| {
            d.auto_cascade = enabled;
            Ok(())
        })
    }

    /// Reset offsets from template values; see
    /// [`crate::schedule::regenerate_schedule`].
    pub fn regenerate(&mut self, options: RegenerateOptions) -> Result<EngineStep> {
        self.commit("regenerate", |d| {
            let before: Vec<(MilestoneId, i64)> =
                d.milestones.iter().map(|m| (m.id.clone(), m.offset_days)).collect();
            d.keep_planned = completed_ids(&d.milestones);
            regenerate_schedule(&mut d.milestones, &d.start_date, options)?;

            let moved: Vec<MilestoneId> = d
                .milestones
                .iter()
                .filter(|m| before.iter().any(|(id, o)| *id == m.id && *o != m.offset_days))
                .map(|m| m.id.clone())
                .collect();
            d.record_shifted(moved);
            Ok(())
        })
    }
}

/// Shared by `set_duration` and `set_finish_date_manual`.
fn apply_duration(d: &mut Draft, id: &str, days: i64) -> Result<()> {
    d.position(id)?;
    let applied = d.clamp_duration(id, days);
    let m = d.get_mut(id)?;
    let delta = applied - m.duration_days;
    m.duration_days = applied;
    d.cascade(id, delta)
}
