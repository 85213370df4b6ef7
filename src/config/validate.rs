// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{ProjectFile, RawProjectFile};
use crate::dates::parse_date;
use crate::errors::{Result, SchedError};

impl TryFrom<RawProjectFile> for ProjectFile {
    type Error = SchedError;

    fn try_from(raw: RawProjectFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_project(&raw)?;
        Ok(ProjectFile::new_unchecked(raw.project, raw.milestone))
    }
}

fn validate_raw_project(raw: &RawProjectFile) -> Result<()> {
    ensure_has_milestones(raw)?;
    validate_project_section(raw)?;
    validate_milestone_fields(raw)?;
    validate_dependencies(raw)?;
    validate_dag(raw)?;
    Ok(())
}

fn ensure_has_milestones(raw: &RawProjectFile) -> Result<()> {
    if raw.milestone.is_empty() {
        return Err(SchedError::ConfigError(
            "project file must contain at least one [milestone.<id>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_project_section(raw: &RawProjectFile) -> Result<()> {
    let start = raw.project.start_date.trim();
    if !start.is_empty() && parse_date(start).is_none() {
        return Err(SchedError::ConfigError(format!(
            "[project].start_date must be YYYY-MM-DD (got {start:?})"
        )));
    }
    Ok(())
}

fn validate_milestone_fields(raw: &RawProjectFile) -> Result<()> {
    for (id, m) in raw.milestone.iter() {
        if let Some(p) = m.percent_complete {
            if p > 100 {
                return Err(SchedError::ConfigError(format!(
                    "milestone '{id}' has percent_complete {p} (must be 0..=100)"
                )));
            }
        }
        for (field, value) in [("actual_start", &m.actual_start), ("actual_finish", &m.actual_finish)] {
            if let Some(v) = value {
                if !v.trim().is_empty() && parse_date(v).is_none() {
                    return Err(SchedError::ConfigError(format!(
                        "milestone '{id}' has invalid {field} {v:?} (expected YYYY-MM-DD)"
                    )));
                }
            }
        }
    }
    Ok(())
}

fn validate_dependencies(raw: &RawProjectFile) -> Result<()> {
    for (id, m) in raw.milestone.iter() {
        for dep in m.depends_on.iter() {
            if dep == id {
                return Err(SchedError::ConfigError(format!(
                    "milestone '{id}' cannot depend on itself in `depends_on`"
                )));
            }
            if !raw.milestone.contains_key(dep) {
                return Err(SchedError::ConfigError(format!(
                    "milestone '{id}' has unknown dependency '{dep}' in `depends_on`"
                )));
            }
        }
    }
    Ok(())
}

fn validate_dag(raw: &RawProjectFile) -> Result<()> {
    // Edge direction: predecessor -> milestone. For
    //   [milestone.framing]
    //   depends_on = ["foundation"]
    // we add edge foundation -> framing.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for id in raw.milestone.keys() {
        graph.add_node(id.as_str());
    }

    for (id, m) in raw.milestone.iter() {
        for dep in m.depends_on.iter() {
            graph.add_edge(dep.as_str(), id.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(SchedError::CyclicDependency(format!(
            "cycle detected in milestone graph involving '{}'",
            cycle.node_id()
        ))),
    }
}
