// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::model::MilestoneId;

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Milestone not found: {0}")]
    MilestoneNotFound(MilestoneId),

    #[error("Milestone '{milestone}' depends on unknown milestone '{dependency}'")]
    UnknownDependency {
        milestone: MilestoneId,
        dependency: MilestoneId,
    },

    #[error("Duplicate milestone id: {0}")]
    DuplicateMilestone(MilestoneId),

    #[error("Cyclic dependency: {0}")]
    CyclicDependency(String),

    #[error("Project start date is not set")]
    MissingStartDate,

    #[error("Invalid date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Moving '{milestone}' would place it on the wrong side of '{other}'")]
    ReorderViolatesDependency {
        milestone: MilestoneId,
        other: MilestoneId,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SchedError>;
