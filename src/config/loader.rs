// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{ProjectFile, RawProjectFile};
use crate::errors::Result;

/// Read a project file and deserialize it into a `RawProjectFile`.
///
/// No semantic checks happen here (unknown dependencies, cycles, dates);
/// use [`load_and_validate`] for those.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawProjectFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let raw = parse_raw(&contents)?;
    debug!(path = ?path, milestones = raw.milestone.len(), "parsed project file");
    Ok(raw)
}

/// Read and validate a project file.
///
/// Missing optional keys take their `serde` defaults. Validation rejects:
/// - a file with no milestones,
/// - an unparsable `start_date`, `actual_start` or `actual_finish`,
/// - `percent_complete` above 100,
/// - unknown or self `depends_on` references,
/// - dependency cycles.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ProjectFile> {
    ProjectFile::try_from(load_from_path(path)?)
}

/// [`load_and_validate`] for TOML already in memory.
pub fn parse_and_validate(contents: &str) -> Result<ProjectFile> {
    ProjectFile::try_from(parse_raw(contents)?)
}

fn parse_raw(contents: &str) -> Result<RawProjectFile> {
    Ok(toml::from_str(contents)?)
}
