use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Progress state of a milestone.
///
/// Status is coupled to `percent_complete`; see [`crate::status`] for the
/// transition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    NotStarted,
    InProgress,
    Complete,
}

impl Default for MilestoneStatus {
    fn default() -> Self {
        MilestoneStatus::NotStarted
    }
}

impl MilestoneStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneStatus::NotStarted => "not_started",
            MilestoneStatus::InProgress => "in_progress",
            MilestoneStatus::Complete => "complete",
        }
    }
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MilestoneStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "not_started" => Ok(MilestoneStatus::NotStarted),
            "in_progress" => Ok(MilestoneStatus::InProgress),
            "complete" | "completed" | "done" => Ok(MilestoneStatus::Complete),
            other => Err(format!(
                "invalid status: {other} (expected \"not_started\", \"in_progress\" or \"complete\")"
            )),
        }
    }
}

/// Where schedule snapshots are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Store snapshots in a file (`.sitesched/snapshot.json`).
    File,
    /// Keep snapshots in memory only (lost on exit).
    Memory,
}

impl Default for StorageMode {
    fn default() -> Self {
        StorageMode::Memory
    }
}
