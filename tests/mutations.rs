mod common;
use crate::common::{get, init_tracing};

use sitesched::engine::Advisory;
use sitesched::errors::SchedError;
use sitesched::model::NewMilestone;
use sitesched::types::MilestoneStatus;
use sitesched_test_utils::builders::{MilestoneBuilder, ProjectBuilder, two_step_project};

fn ids(engine: &sitesched::engine::ScheduleEngine) -> Vec<String> {
    engine.milestones().iter().map(|m| m.id.clone()).collect()
}

#[test]
fn added_milestone_goes_after_the_latest_finish() {
    init_tracing();

    let mut engine = two_step_project().engine();
    let (id, step) = engine
        .add_milestone(NewMilestone::new("Roofing", 7))
        .unwrap();

    let m = get(&engine, &id);
    assert_eq!(m.name, "Roofing");
    assert_eq!(m.offset_days, 28);
    assert_eq!(m.base_offset_days, Some(28));
    assert_eq!(m.planned_start, "2024-01-29");
    assert_eq!(m.planned_finish, "2024-02-05");
    assert_eq!(m.order, 2);
    assert!(step.advisories.is_empty());
}

#[test]
fn generated_ids_are_unique() {
    let mut engine = two_step_project().engine();
    let (a, _) = engine.add_milestone(NewMilestone::new("A", 1)).unwrap();
    let (b, _) = engine.add_milestone(NewMilestone::new("B", 1)).unwrap();
    assert_ne!(a, b);
    assert_eq!(engine.milestones().len(), 4);
}

#[test]
fn added_milestone_with_predecessor_follows_it() {
    let mut engine = two_step_project().engine();
    engine
        .add_milestone_with_id("m3", NewMilestone::new("M3", 3).after("m2").at_offset(0))
        .unwrap();

    assert_eq!(get(&engine, "m3").planned_start, "2024-02-12");
    assert_eq!(ids(&engine), vec!["m1", "m2", "m3"]);
}

#[test]
fn add_rejects_unknown_dependency_and_duplicate_id() {
    let mut engine = two_step_project().engine();
    let before = engine.snapshot();

    match engine.add_milestone(NewMilestone::new("X", 5).after("ghost")) {
        Err(SchedError::UnknownDependency { dependency, .. }) => assert_eq!(dependency, "ghost"),
        other => panic!("expected UnknownDependency, got {other:?}"),
    }
    match engine.add_milestone_with_id("m1", NewMilestone::new("Again", 5)) {
        Err(SchedError::DuplicateMilestone(id)) => assert_eq!(id, "m1"),
        other => panic!("expected DuplicateMilestone, got {other:?}"),
    }

    assert_eq!(engine.snapshot(), before);
}

#[test]
fn add_clamps_duration_and_offset() {
    let mut engine = two_step_project().engine();
    let (id, step) = engine
        .add_milestone(NewMilestone::new("Tiny", 0).at_offset(-3))
        .unwrap();

    let m = get(&engine, &id);
    assert_eq!(m.duration_days, 1);
    assert_eq!(m.offset_days, 0);
    assert!(step.has_advisory(|a| matches!(a, Advisory::DurationClamped { applied: 1, .. })));
    assert!(step.has_advisory(|a| matches!(a, Advisory::OffsetClamped { applied: 0, .. })));
}

#[test]
fn removing_a_predecessor_frees_its_dependents() {
    let mut engine = two_step_project().engine();
    engine.remove_milestone("m1").unwrap();

    let m2 = get(&engine, "m2");
    assert!(m2.depends_on.is_empty());
    assert_eq!(m2.planned_start, "2024-01-01");
    assert_eq!(m2.order, 0);

    assert!(matches!(
        engine.remove_milestone("m1"),
        Err(SchedError::MilestoneNotFound(_))
    ));
}

#[test]
fn reorder_moves_independent_milestones() {
    let mut engine = ProjectBuilder::new("2024-01-01")
        .with_milestone(MilestoneBuilder::new("a", 1).build())
        .with_milestone(MilestoneBuilder::new("b", 1).build())
        .with_milestone(MilestoneBuilder::new("c", 1).build())
        .engine();

    engine.reorder("c", 0).unwrap();
    assert_eq!(ids(&engine), vec!["c", "a", "b"]);
    assert_eq!(get(&engine, "c").order, 0);
    assert_eq!(get(&engine, "b").order, 2);

    // Out-of-range targets land at the end.
    engine.reorder("c", 99).unwrap();
    assert_eq!(ids(&engine), vec!["a", "b", "c"]);
}

#[test]
fn reorder_cannot_cross_a_dependency() {
    let mut engine = two_step_project().engine();
    let before = engine.snapshot();

    match engine.reorder("m2", 0) {
        Err(SchedError::ReorderViolatesDependency { milestone, other }) => {
            assert_eq!(milestone, "m2");
            assert_eq!(other, "m1");
        }
        other => panic!("expected ReorderViolatesDependency, got {other:?}"),
    }
    assert!(matches!(
        engine.reorder("m1", 1),
        Err(SchedError::ReorderViolatesDependency { .. })
    ));
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn bulk_shift_skips_complete_and_pinned() {
    let mut engine = ProjectBuilder::new("2024-01-01")
        .with_milestone(MilestoneBuilder::new("open", 5).build())
        .with_milestone(MilestoneBuilder::new("pinned", 5).offset(2).pinned(true).build())
        .with_milestone(
            MilestoneBuilder::new("done", 5)
                .offset(3)
                .status(MilestoneStatus::Complete)
                .build(),
        )
        .with_milestone(MilestoneBuilder::new("late", 5).offset(10).build())
        .engine();

    let step = engine.bulk_shift(7).unwrap();
    assert_eq!(step.shifted, vec!["open".to_string(), "late".to_string()]);
    assert_eq!(get(&engine, "open").offset_days, 7);
    assert_eq!(get(&engine, "open").planned_start, "2024-01-08");
    assert_eq!(get(&engine, "late").offset_days, 17);
    assert_eq!(get(&engine, "pinned").offset_days, 2);
    assert_eq!(get(&engine, "done").offset_days, 3);

    engine.bulk_shift(-20).unwrap();
    assert_eq!(get(&engine, "open").offset_days, 0);
    assert_eq!(get(&engine, "late").offset_days, 0);

    let step = engine.bulk_shift(0).unwrap();
    assert!(step.shifted.is_empty());
}

#[test]
fn project_start_date_can_change_or_clear() {
    let mut engine = two_step_project().engine();

    engine.set_start_date("2024-02-01").unwrap();
    assert_eq!(engine.start_date(), "2024-02-01");
    assert_eq!(get(&engine, "m1").planned_start, "2024-02-01");
    assert_eq!(get(&engine, "m2").planned_start, "2024-02-29");

    let before = engine.snapshot();
    assert!(matches!(
        engine.set_start_date("2024-13-01"),
        Err(SchedError::InvalidDate(_))
    ));
    assert_eq!(engine.snapshot(), before);

    let step = engine.set_start_date("").unwrap();
    assert!(step.has_advisory(|a| *a == Advisory::MissingStartDate));
    assert!(get(&engine, "m1").planned_start.is_empty());
    assert_eq!(get(&engine, "m2").duration_days, 14);
}

#[test]
fn manual_start_needs_a_project_start_and_a_valid_date() {
    let mut undated = ProjectBuilder::new("")
        .with_milestone(MilestoneBuilder::new("a", 3).build())
        .engine();
    assert!(matches!(
        undated.set_start_date_manual("a", "2024-01-10"),
        Err(SchedError::MissingStartDate)
    ));

    let mut engine = two_step_project().engine();
    assert!(matches!(
        engine.set_start_date_manual("m1", "soon"),
        Err(SchedError::InvalidDate(_))
    ));
    assert!(!get(&engine, "m1").manually_pinned);
}

#[test]
fn manual_start_before_project_start_clamps_to_zero() {
    let mut engine = two_step_project().engine();
    let step = engine.set_start_date_manual("m1", "2023-12-20").unwrap();

    assert_eq!(get(&engine, "m1").offset_days, 0);
    assert_eq!(get(&engine, "m1").planned_start, "2024-01-01");
    assert!(step.has_advisory(|a| matches!(a, Advisory::OffsetClamped { requested: -12, .. })));
}

#[test]
fn rename_and_trade_edits() {
    let mut engine = two_step_project().engine();

    engine.rename("m1", "Foundation").unwrap();
    engine
        .set_trade("m1", Some("trade-7".to_string()), None)
        .unwrap();
    engine
        .set_trade("m2", None, Some("Bob's framing".to_string()))
        .unwrap();

    assert_eq!(get(&engine, "m1").name, "Foundation");
    assert_eq!(get(&engine, "m1").trade_id.as_deref(), Some("trade-7"));
    assert_eq!(get(&engine, "m2").free_text_trade.as_deref(), Some("Bob's framing"));
    assert!(get(&engine, "m2").trade_id.is_none());
}

#[test]
fn metrics_summarize_progress() {
    let mut engine = two_step_project().engine();
    engine.set_status("m1", MilestoneStatus::Complete).unwrap();

    let metrics = engine.metrics();
    assert_eq!(metrics.completed, 1);
    assert_eq!(metrics.total, 2);
    assert_eq!(metrics.percent_complete, 50);
    assert_eq!(metrics.first_planned_start.as_deref(), Some("2024-01-01"));
    assert_eq!(metrics.estimated_finish.as_deref(), Some("2024-02-12"));

    let empty = ProjectBuilder::new("2024-01-01").engine().metrics();
    assert_eq!(empty.total, 0);
    assert_eq!(empty.percent_complete, 0);
    assert!(empty.estimated_finish.is_none());
}

#[test]
fn percent_complete_rounds() {
    let engine = ProjectBuilder::new("2024-01-01")
        .with_milestone(MilestoneBuilder::new("a", 1).status(MilestoneStatus::Complete).build())
        .with_milestone(MilestoneBuilder::new("b", 1).build())
        .with_milestone(MilestoneBuilder::new("c", 1).build())
        .engine();

    assert_eq!(engine.metrics().percent_complete, 33);
}

#[test]
fn failed_edit_leaves_state_untouched() {
    let mut engine = two_step_project().engine();
    let before = engine.snapshot();
    let conflicts_before = engine.conflicts().to_vec();

    assert!(matches!(
        engine.set_dependencies("m1", vec!["m2".to_string()]),
        Err(SchedError::CyclicDependency(_))
    ));
    assert!(matches!(
        engine.set_duration("ghost", 3),
        Err(SchedError::MilestoneNotFound(_))
    ));

    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.conflicts(), conflicts_before.as_slice());
}

#[test]
fn auto_cascade_toggle_persists() {
    let mut engine = two_step_project().engine();
    assert!(engine.auto_cascade());
    engine.set_auto_cascade(false).unwrap();
    assert!(!engine.auto_cascade());
    assert!(!engine.snapshot().auto_cascade);
}
