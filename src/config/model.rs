// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::model::{Milestone, ProjectState};
use crate::types::{MilestoneStatus, StorageMode};

/// Project file as read from TOML, before validation.
///
/// ```toml
/// [project]
/// name = "Smith residence"
/// start_date = "2024-01-01"
/// auto_cascade = true
///
/// [milestone.foundation]
/// name = "Foundation"
/// duration_days = 28
///
/// [milestone.framing]
/// name = "Framing"
/// duration_days = 14
/// depends_on = ["foundation"]
/// ```
///
/// Convert with `ProjectFile::try_from` (or use
/// [`crate::config::load_and_validate`]) to get a validated [`ProjectFile`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawProjectFile {
    #[serde(default)]
    pub project: ProjectSection,

    /// Keys are the milestone ids (e.g. `"foundation"`).
    #[serde(default)]
    pub milestone: BTreeMap<String, MilestoneConfig>,
}

/// A project file that passed validation.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    pub project: ProjectSection,
    pub milestone: BTreeMap<String, MilestoneConfig>,
}

impl ProjectFile {
    pub(crate) fn new_unchecked(
        project: ProjectSection,
        milestone: BTreeMap<String, MilestoneConfig>,
    ) -> Self {
        Self { project, milestone }
    }

    /// Build the engine's input. Milestones are ordered by `order`, then by id.
    pub fn to_project_state(&self) -> ProjectState {
        let mut entries: Vec<(&String, &MilestoneConfig)> = self.milestone.iter().collect();
        entries.sort_by_key(|(id, mc)| (mc.order.unwrap_or(usize::MAX), (*id).clone()));

        let milestones = entries
            .into_iter()
            .enumerate()
            .map(|(pos, (id, mc))| mc.to_milestone(id, pos))
            .collect();

        ProjectState {
            name: self.project.name.clone(),
            start_date: self.project.start_date.clone(),
            auto_cascade: self.project.auto_cascade,
            milestones,
        }
    }
}

/// `[project]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    #[serde(default)]
    pub name: String,

    /// `YYYY-MM-DD`, or empty when the start is not known yet.
    #[serde(default)]
    pub start_date: String,

    /// Whether duration/offset edits move dependents.
    #[serde(default = "default_auto_cascade")]
    pub auto_cascade: bool,

    /// `"memory"` (default) or `"file"`.
    #[serde(default)]
    pub storage: StorageMode,
}

fn default_auto_cascade() -> bool {
    true
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            name: String::new(),
            start_date: String::new(),
            auto_cascade: default_auto_cascade(),
            storage: StorageMode::default(),
        }
    }
}

/// `[milestone.<id>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MilestoneConfig {
    /// Display name; defaults to the id.
    #[serde(default)]
    pub name: Option<String>,

    /// Position hint; milestones without one sort after those with one.
    #[serde(default)]
    pub order: Option<usize>,

    pub duration_days: i64,

    #[serde(default)]
    pub offset_days: Option<i64>,

    /// Template offset for regeneration; defaults to `offset_days`.
    #[serde(default)]
    pub base_offset_days: Option<i64>,

    /// Predecessor ids (`depends_on = ["foundation"]`).
    #[serde(default)]
    pub depends_on: Vec<String>,

    #[serde(default)]
    pub pinned: bool,

    #[serde(default)]
    pub status: Option<MilestoneStatus>,

    #[serde(default)]
    pub percent_complete: Option<u8>,

    #[serde(default)]
    pub actual_start: Option<String>,

    #[serde(default)]
    pub actual_finish: Option<String>,

    #[serde(default)]
    pub trade_id: Option<String>,

    /// Free-text trade label.
    #[serde(default)]
    pub trade: Option<String>,
}

impl MilestoneConfig {
    fn to_milestone(&self, id: &str, pos: usize) -> Milestone {
        let name = self.name.clone().unwrap_or_else(|| id.to_string());
        let mut m = Milestone::new(id, name, self.duration_days);
        m.order = pos;
        m.offset_days = self.offset_days.unwrap_or(0);
        m.base_offset_days = self.base_offset_days.or(self.offset_days);
        m.depends_on = self.depends_on.clone();
        m.manually_pinned = self.pinned;
        m.status = self.status.unwrap_or_default();
        m.percent_complete = self.percent_complete.unwrap_or(0);
        m.actual_start = self.actual_start.clone().unwrap_or_default();
        m.actual_finish = self.actual_finish.clone().unwrap_or_default();
        m.trade_id = self.trade_id.clone();
        m.free_text_trade = self.trade.clone();
        m
    }
}
