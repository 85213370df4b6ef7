// src/model/project.rs

use serde::{Deserialize, Serialize};

use crate::model::Milestone;

/// The slice of a project the engine works on.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectState {
    #[serde(default)]
    pub name: String,

    /// ISO date or empty.
    #[serde(default)]
    pub start_date: String,

    #[serde(default = "default_auto_cascade")]
    pub auto_cascade: bool,

    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

fn default_auto_cascade() -> bool {
    true
}

impl Default for ProjectState {
    fn default() -> Self {
        Self {
            name: String::new(),
            start_date: String::new(),
            auto_cascade: default_auto_cascade(),
            milestones: Vec::new(),
        }
    }
}

impl ProjectState {
    pub fn new(start_date: impl Into<String>, milestones: Vec<Milestone>) -> Self {
        Self {
            start_date: start_date.into(),
            milestones,
            ..Default::default()
        }
    }
}
