pub mod builders;

use std::sync::Once;

use chrono::NaiveDate;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Date every test engine treats as "today" when stamping actuals.
pub const TODAY: &str = "2024-03-01";

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Parse a `YYYY-MM-DD` literal, panicking on typos in test code.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date literal must be YYYY-MM-DD")
}
