#![allow(dead_code)]

pub use sitesched_test_utils::{TODAY, date, init_tracing};

use sitesched::engine::ScheduleEngine;
use sitesched::model::Milestone;

/// Look up a milestone that the test set up, panicking with its id if gone.
pub fn get<'a>(engine: &'a ScheduleEngine, id: &str) -> &'a Milestone {
    engine
        .milestone(id)
        .unwrap_or_else(|| panic!("milestone {id} missing"))
}
