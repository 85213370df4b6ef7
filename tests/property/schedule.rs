use std::collections::{HashMap, HashSet, VecDeque};

use proptest::prelude::*;
use sitesched::dag::ensure_acyclic;
use sitesched::dates::add_days;
use sitesched::errors::SchedError;
use sitesched::model::Milestone;
use sitesched::schedule::{RegenerateOptions, compute_schedule, dependency_conflicts};
use sitesched_test_utils::builders::{MilestoneBuilder, ProjectBuilder};

const START: &str = "2024-01-01";

// Strategy for an acyclic milestone set: milestone N may only depend on
// milestones 0..N-1. The list is shuffled so callers see it out of order.
fn milestones_strategy(max: usize) -> impl Strategy<Value = Vec<Milestone>> {
    (1..=max)
        .prop_flat_map(|n| {
            proptest::collection::vec(
                (
                    proptest::collection::vec(any::<usize>(), 0..3),
                    1..=30i64,
                    0..=60i64,
                    proptest::bool::weighted(0.2),
                ),
                n,
            )
        })
        .prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (potential_deps, duration, offset, pinned))| {
                    let mut builder = MilestoneBuilder::new(&format!("m{i}"), duration)
                        .offset(offset)
                        .pinned(pinned);
                    let mut seen = HashSet::new();
                    for dep in potential_deps {
                        if i > 0 && seen.insert(dep % i) {
                            builder = builder.after(&format!("m{}", dep % i));
                        }
                    }
                    builder.build()
                })
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

fn engine_for(milestones: Vec<Milestone>) -> sitesched::engine::ScheduleEngine {
    milestones
        .into_iter()
        .fold(ProjectBuilder::new(START), |b, m| b.with_milestone(m))
        .engine()
}

// Reference BFS over `depends_on`, independent of the graph module.
fn reference_dependents(milestones: &[Milestone], root: &str) -> HashSet<String> {
    let mut out = HashSet::new();
    let mut queue = VecDeque::from([root.to_string()]);
    while let Some(id) = queue.pop_front() {
        for m in milestones {
            if m.depends_on.contains(&id) && out.insert(m.id.clone()) {
                queue.push_back(m.id.clone());
            }
        }
    }
    out
}

proptest! {
    #[test]
    fn finish_is_start_plus_duration(ms in milestones_strategy(10)) {
        let computed = compute_schedule(&ms, START).unwrap();
        prop_assert_eq!(computed.len(), ms.len());
        for m in &computed {
            prop_assert!(!m.planned_start.is_empty());
            prop_assert_eq!(&m.planned_finish, &add_days(&m.planned_start, m.duration_days));
        }
    }

    #[test]
    fn predecessors_are_evaluated_first(ms in milestones_strategy(10)) {
        let computed = compute_schedule(&ms, START).unwrap();
        let pos: HashMap<&str, usize> =
            computed.iter().enumerate().map(|(i, m)| (m.id.as_str(), i)).collect();
        for (i, m) in computed.iter().enumerate() {
            prop_assert_eq!(m.order, i);
            for dep in &m.depends_on {
                prop_assert!(pos[dep.as_str()] < i);
            }
        }
    }

    #[test]
    fn conflicts_match_pinned_overlaps(ms in milestones_strategy(10)) {
        let computed = compute_schedule(&ms, START).unwrap();
        let by_id: HashMap<&str, &Milestone> =
            computed.iter().map(|m| (m.id.as_str(), m)).collect();
        let flagged: HashSet<String> =
            dependency_conflicts(&computed).into_iter().map(|c| c.task_id).collect();

        for m in &computed {
            let latest_pred_finish = m
                .depends_on
                .iter()
                .map(|d| by_id[d.as_str()].planned_finish.clone())
                .max();
            // ISO dates compare correctly as strings.
            let expected = latest_pred_finish.is_some_and(|f| m.planned_start < f);
            prop_assert_eq!(flagged.contains(&m.id), expected);
            if expected {
                prop_assert!(m.manually_pinned);
            }
        }
    }

    #[test]
    fn regeneration_is_idempotent(ms in milestones_strategy(10), override_pins in any::<bool>()) {
        let mut engine = engine_for(ms);
        let opts = RegenerateOptions { pinned_override: override_pins };

        engine.regenerate(opts).unwrap();
        let once = engine.snapshot();
        let step = engine.regenerate(opts).unwrap();

        prop_assert!(step.shifted.is_empty());
        prop_assert_eq!(engine.snapshot(), once);
    }

    #[test]
    fn cascade_moves_exactly_unpinned_dependents(
        ms in milestones_strategy(10),
        pick in any::<usize>(),
        delta in 1..=20i64,
    ) {
        let mut engine = engine_for(ms);
        let before = engine.snapshot().milestones;
        let target = before[pick % before.len()].clone();

        let step = engine
            .set_duration(&target.id, target.duration_days + delta)
            .unwrap();

        let reached = reference_dependents(&before, &target.id);
        let expected: HashSet<String> = before
            .iter()
            .filter(|m| reached.contains(&m.id) && !m.manually_pinned)
            .map(|m| m.id.clone())
            .collect();
        let shifted: HashSet<String> = step.shifted.iter().cloned().collect();
        prop_assert_eq!(&shifted, &expected);

        for old in &before {
            let now = engine.milestone(&old.id).unwrap();
            let want = if expected.contains(&old.id) {
                old.offset_days + delta
            } else {
                old.offset_days
            };
            prop_assert_eq!(now.offset_days, want);
        }
    }

    #[test]
    fn dependency_edits_never_create_cycles(
        ms in milestones_strategy(8),
        edits in proptest::collection::vec(
            (any::<usize>(), proptest::collection::vec(any::<usize>(), 0..3)),
            1..12,
        ),
    ) {
        let mut engine = engine_for(ms);
        let ids: Vec<String> = engine.milestones().iter().map(|m| m.id.clone()).collect();

        for (target, deps) in edits {
            let target = &ids[target % ids.len()];
            let deps: Vec<String> = deps.iter().map(|d| ids[d % ids.len()].clone()).collect();
            let before = engine.snapshot();

            match engine.set_dependencies(target, deps) {
                Ok(_) => {}
                Err(SchedError::CyclicDependency(_)) => {
                    prop_assert_eq!(engine.snapshot(), before);
                }
                Err(e) => prop_assert!(false, "unexpected error: {e:?}"),
            }

            prop_assert!(ensure_acyclic(engine.milestones()).is_ok());
            for m in engine.milestones() {
                for dep in &m.depends_on {
                    prop_assert!(engine.milestone(dep).unwrap().order < m.order);
                }
            }
        }
    }
}
