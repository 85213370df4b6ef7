// src/dates/clock.rs

use std::fmt::Debug;

use chrono::{NaiveDate, Utc};

/// Source of "today" for stamping actual start/finish dates.
pub trait Clock: Send + Sync + Debug {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation (UTC calendar date).
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to a single date. Used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}
