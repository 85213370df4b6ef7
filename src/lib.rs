// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod dates;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod model;
pub mod schedule;
pub mod status;
pub mod store;
pub mod types;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::ProjectFile;
use crate::config::loader::load_and_validate;
use crate::engine::{Advisory, ScheduleEngine};
use crate::schedule::RegenerateOptions;
use crate::store::open_store;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - project file loading
/// - the schedule engine
/// - optional regenerate / bulk shift
/// - output (table or JSON)
/// - optional snapshot persistence
pub fn run(args: CliArgs) -> Result<()> {
    let project_path = PathBuf::from(&args.project);
    let file = load_and_validate(&project_path)?;

    if args.dry_run {
        print_dry_run(&file);
        return Ok(());
    }

    let mut engine = ScheduleEngine::new(file.to_project_state())?;

    if args.regenerate {
        let step = engine.regenerate(RegenerateOptions {
            pinned_override: args.override_pins,
        })?;
        info!(shifted = step.shifted.len(), "regenerated schedule");
        log_advisories(&step.advisories);
    }

    if let Some(days) = args.shift {
        let step = engine.bulk_shift(days)?;
        info!(days, shifted = step.shifted.len(), "bulk shift applied");
        log_advisories(&step.advisories);
    }

    if engine.start_date().is_empty() {
        warn!("project has no start_date; planned dates are left empty");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    } else {
        print_schedule(&engine);
    }

    if args.save {
        let mut store = open_store(file.project.storage, project_root_dir(&project_path));
        let written = store.save(&engine.snapshot())?;
        info!(written, "snapshot save finished");
    }

    Ok(())
}

/// Directory that holds the project file; snapshots are stored beside it.
///
/// A bare filename like "Sitesched.toml" (parent = "") falls back to the
/// current working directory.
fn project_root_dir(project_path: &Path) -> PathBuf {
    match project_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

fn print_schedule(engine: &ScheduleEngine) {
    let project = engine.project();
    if !project.name.is_empty() {
        println!("{}", project.name);
    }
    println!(
        "  start_date = {}",
        if project.start_date.is_empty() { "(unset)" } else { &project.start_date }
    );
    println!("  auto_cascade = {}", project.auto_cascade);
    println!();

    println!("milestones ({}):", engine.milestones().len());
    for m in engine.milestones() {
        let pin = if m.manually_pinned { " [pinned]" } else { "" };
        println!(
            "  {:>3}. {} ({}){}",
            m.order + 1,
            m.name,
            m.id,
            pin
        );
        println!(
            "       {} -> {}  ({} days, offset {})",
            or_dash(&m.planned_start),
            or_dash(&m.planned_finish),
            m.duration_days,
            m.offset_days
        );
        println!("       status: {} {}%", m.status, m.percent_complete);
        if !m.depends_on.is_empty() {
            println!("       depends_on: {:?}", m.depends_on);
        }
    }

    let conflicts = engine.conflicts();
    if !conflicts.is_empty() {
        println!();
        println!("conflicts ({}):", conflicts.len());
        for c in conflicts {
            println!(
                "  - {} starts {} day(s) before {} finishes",
                c.task_name, c.overlap_days, c.dep_name
            );
        }
    }

    let metrics = engine.metrics();
    println!();
    println!(
        "progress: {}/{} complete ({}%)",
        metrics.completed, metrics.total, metrics.percent_complete
    );
    if let Some(first) = &metrics.first_planned_start {
        println!("first planned start: {first}");
    }
    if let Some(finish) = &metrics.estimated_finish {
        println!("estimated finish:    {finish}");
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

/// Simple dry-run output: print milestones and their dependencies.
fn print_dry_run(file: &ProjectFile) {
    println!("sitesched dry-run");
    println!("  project.name = {:?}", file.project.name);
    println!("  project.start_date = {:?}", file.project.start_date);
    println!("  project.auto_cascade = {}", file.project.auto_cascade);
    println!("  project.storage = {:?}", file.project.storage);
    println!();

    println!("milestones ({}):", file.milestone.len());
    for (id, m) in file.milestone.iter() {
        println!("  - {id}");
        if let Some(ref name) = m.name {
            println!("      name: {name}");
        }
        println!("      duration_days: {}", m.duration_days);
        if let Some(offset) = m.offset_days {
            println!("      offset_days: {offset}");
        }
        if !m.depends_on.is_empty() {
            println!("      depends_on: {:?}", m.depends_on);
        }
        if m.pinned {
            println!("      pinned: true");
        }
        if let Some(status) = m.status {
            println!("      status: {status}");
        }
    }

    debug!("dry-run complete (no scheduling)");
}

fn log_advisories(advisories: &[Advisory]) {
    for a in advisories {
        warn!("{}", describe_advisory(a));
    }
}

/// Human-readable line for an advisory, for callers that surface them.
pub fn describe_advisory(advisory: &Advisory) -> String {
    match advisory {
        Advisory::MissingStartDate => "project start date is not set".to_string(),
        Advisory::DurationClamped {
            milestone,
            requested,
            applied,
        } => format!("{milestone}: duration {requested} raised to {applied}"),
        Advisory::OffsetClamped {
            milestone,
            requested,
            applied,
        } => format!("{milestone}: offset {requested} raised to {applied}"),
        Advisory::DanglingDependency {
            milestone,
            dependency,
        } => format!("{milestone}: ignoring unknown predecessor {dependency}"),
    }
}
